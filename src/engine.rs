//! The simulation engine.
//!
//! A [`Simulation`] owns one reference sequence, one set of frames and one
//! policy. It yields a [`Step`] per access, in order, either lazily through
//! its `Iterator` impl or all at once through [`Simulation::run`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::SimError,
    frames::FrameSet,
    page::{Page, ReferenceSequence},
    policy::{Policy, PolicyKind, Replacer},
};

/// Fixed parameters of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub capacity: usize,
    pub policy: PolicyKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Hit,
    Fault,
}

/// What happened on one access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Position of the access in the reference sequence.
    pub index: usize,
    pub page: Page,
    pub outcome: Outcome,
    /// Page that had to make room. `None` on hits and while free frames remain.
    pub evicted: Option<Page>,
    /// Frame written on a fault.
    pub slot: Option<usize>,
    /// Frame contents after the access.
    pub frames: Vec<Option<Page>>,
    /// Running totals including this access.
    pub hits: usize,
    pub faults: usize,
}

impl Step {
    pub fn is_hit(&self) -> bool {
        self.outcome == Outcome::Hit
    }
}

/// Totals of a run, folded from its steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub accesses: usize,
    pub hits: usize,
    pub faults: usize,
    pub frames: Vec<Option<Page>>,
}

impl Summary {
    /// Summary of a run with no accesses.
    pub fn empty(capacity: usize) -> Self {
        Self {
            accesses: 0,
            hits: 0,
            faults: 0,
            frames: vec![None; capacity],
        }
    }

    pub fn from_steps<'a>(capacity: usize, steps: impl IntoIterator<Item = &'a Step>) -> Self {
        steps
            .into_iter()
            .fold(Self::empty(capacity), |mut summary, step| {
                summary.record(step);
                summary
            })
    }

    pub fn record(&mut self, step: &Step) {
        self.accesses += 1;
        match step.outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::Fault => self.faults += 1,
        }
        self.frames.clone_from(&step.frames);
    }

    pub fn fault_rate(&self) -> f64 {
        ratio(self.faults, self.accesses)
    }

    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.accesses)
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Full output of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace {
    pub config: SimConfig,
    pub steps: Vec<Step>,
    pub summary: Summary,
}

pub struct Simulation {
    sequence: ReferenceSequence,
    config: SimConfig,
    frames: FrameSet,
    policy: Policy,
    position: usize,
    hits: usize,
    faults: usize,
}

impl Simulation {
    pub fn new(
        sequence: impl Into<ReferenceSequence>,
        config: SimConfig,
    ) -> Result<Self, SimError> {
        let sequence = sequence.into();
        let frames = FrameSet::new(config.capacity)?;
        let policy = Policy::new(config.policy, &sequence);
        Ok(Self {
            sequence,
            config,
            frames,
            policy,
            position: 0,
            hits: 0,
            faults: 0,
        })
    }

    pub fn config(&self) -> SimConfig {
        self.config
    }

    pub fn sequence(&self) -> &ReferenceSequence {
        &self.sequence
    }

    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Processes the next access. `Ok(None)` once the sequence is exhausted.
    pub fn step(&mut self) -> Result<Option<Step>, SimError> {
        let Some(&page) = self.sequence.get(self.position) else {
            return Ok(None);
        };
        let index = self.position;

        let (outcome, evicted, slot) = if self.frames.contains(page) {
            self.policy.touch(page, index);
            self.hits += 1;
            (Outcome::Hit, None, None)
        } else {
            let (slot, evicted) = if self.frames.is_full() {
                let victim = self.policy.evict(&self.frames, index).ok_or(
                    SimError::CapacityExceeded {
                        page,
                        capacity: self.frames.capacity(),
                    },
                )?;
                let slot = self.frames.replace(victim, page)?;
                debug!(
                    index,
                    page,
                    victim,
                    slot,
                    policy = %self.config.policy,
                    "evicted"
                );
                (slot, Some(victim))
            } else {
                (self.frames.place(page)?, None)
            };
            self.policy.admit(page, index);
            self.faults += 1;
            (Outcome::Fault, evicted, Some(slot))
        };

        self.position += 1;
        Ok(Some(Step {
            index,
            page,
            outcome,
            evicted,
            slot,
            frames: self.frames.snapshot(),
            hits: self.hits,
            faults: self.faults,
        }))
    }

    /// Runs the remaining accesses and returns every step with the summary.
    pub fn run(mut self) -> Result<Trace, SimError> {
        let steps = self.by_ref().collect::<Result<Vec<_>, _>>()?;
        let summary = Summary::from_steps(self.config.capacity, &steps);
        log_summary(&self.config, &summary);
        Ok(Trace {
            config: self.config,
            steps,
            summary,
        })
    }

    /// Like [`Simulation::run`], without keeping the steps.
    pub fn summarize(mut self) -> Result<Summary, SimError> {
        let mut summary = Summary::empty(self.config.capacity);
        for step in self.by_ref() {
            summary.record(&step?);
        }
        log_summary(&self.config, &summary);
        Ok(summary)
    }
}

impl Iterator for Simulation {
    type Item = Result<Step, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.step();
        if step.is_err() {
            // Nothing sensible can follow a broken frame invariant.
            self.position = self.sequence.len();
        }
        step.transpose()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sequence.len().saturating_sub(self.position);
        (0, Some(remaining))
    }
}

fn log_summary(config: &SimConfig, summary: &Summary) {
    debug!(
        policy = %config.policy,
        capacity = config.capacity,
        accesses = summary.accesses,
        hits = summary.hits,
        faults = summary.faults,
        "simulation finished"
    );
}

/// Simulates `sequence` on `capacity` frames under `policy`.
pub fn run(sequence: &[Page], capacity: usize, policy: PolicyKind) -> Result<Trace, SimError> {
    Simulation::new(sequence, SimConfig { capacity, policy })?.run()
}

/// Totals only; the per-step snapshots are not kept.
pub fn summarize(
    sequence: &[Page],
    capacity: usize,
    policy: PolicyKind,
) -> Result<Summary, SimError> {
    Simulation::new(sequence, SimConfig { capacity, policy })?.summarize()
}
