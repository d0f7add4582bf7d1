//! Side-by-side runs: all policies on one capacity, or one policy over a
//! range of capacities.

use std::{ops::RangeInclusive, panic, thread};

use serde::Serialize;
use tracing::info;

use crate::{
    engine::{SimConfig, Simulation, Summary},
    error::SimError,
    page::ReferenceSequence,
    policy::PolicyKind,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyReport {
    pub policy: PolicyKind,
    pub summary: Summary,
}

/// Runs every policy on `sequence`, each on its own thread. Reports come back
/// in [`PolicyKind::ALL`] order.
pub fn compare(
    sequence: &ReferenceSequence,
    capacity: usize,
) -> Result<Vec<PolicyReport>, SimError> {
    if capacity == 0 {
        return Err(SimError::InvalidCapacity(capacity));
    }

    thread::scope(|scope| {
        let handles: Vec<_> = PolicyKind::ALL
            .into_iter()
            .map(|policy| {
                let sequence = sequence.clone();
                let handle = scope.spawn(move || {
                    Simulation::new(sequence, SimConfig { capacity, policy })?.summarize()
                });
                (policy, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(policy, handle)| {
                let summary = handle
                    .join()
                    .unwrap_or_else(|payload| panic::resume_unwind(payload))?;
                Ok::<_, SimError>(PolicyReport { policy, summary })
            })
            .collect()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepPoint {
    pub capacity: usize,
    pub faults: usize,
}

/// Fault counts of one policy across a range of capacities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sweep {
    pub policy: PolicyKind,
    pub points: Vec<SweepPoint>,
}

impl Sweep {
    /// Adjacent capacities where one more frame gave more faults
    /// (Belady's anomaly). Never happens for LRU or OPT.
    pub fn anomalies(&self) -> Vec<(SweepPoint, SweepPoint)> {
        self.points
            .windows(2)
            .filter(|pair| pair[1].faults > pair[0].faults)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }
}

pub fn sweep(
    sequence: &ReferenceSequence,
    policy: PolicyKind,
    capacities: RangeInclusive<usize>,
) -> Result<Sweep, SimError> {
    if *capacities.start() == 0 {
        return Err(SimError::InvalidCapacity(0));
    }

    let points = capacities
        .map(|capacity| {
            let summary =
                Simulation::new(sequence.clone(), SimConfig { capacity, policy })?.summarize()?;
            Ok::<_, SimError>(SweepPoint {
                capacity,
                faults: summary.faults,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let sweep = Sweep { policy, points };
    let anomalies = sweep.anomalies().len();
    if anomalies > 0 {
        info!(policy = %policy, anomalies, "fault count grew with capacity");
    }
    Ok(sweep)
}
