use std::collections::{HashMap, HashSet};

use pagesim::{run, Policy, PolicyKind, SimConfig, Simulation};
use proptest::prelude::*;

fn sequences() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..8, 0..60)
}

fn policies() -> impl Strategy<Value = PolicyKind> {
    prop::sample::select(PolicyKind::ALL.to_vec())
}

/// Frames before each access, alongside the step it produced.
fn steps_with_prior_frames(
    sequence: &[usize],
    capacity: usize,
    policy: PolicyKind,
) -> Vec<(Vec<Option<usize>>, pagesim::Step)> {
    let mut sim = Simulation::new(sequence, SimConfig { capacity, policy }).unwrap();
    let mut out = Vec::new();
    loop {
        let before = sim.frames().snapshot();
        match sim.step().unwrap() {
            Some(step) => out.push((before, step)),
            None => return out,
        }
    }
}

proptest! {
    #[test]
    fn hits_and_faults_cover_every_access(
        sequence in sequences(),
        capacity in 1usize..6,
        policy in policies()
    ) {
        let trace = run(&sequence, capacity, policy).unwrap();
        prop_assert_eq!(trace.summary.hits + trace.summary.faults, sequence.len());
        prop_assert_eq!(trace.steps.len(), sequence.len());
    }

    #[test]
    fn frames_never_hold_duplicates(
        sequence in sequences(),
        capacity in 1usize..6,
        policy in policies()
    ) {
        for step in run(&sequence, capacity, policy).unwrap().steps {
            let resident: Vec<_> = step.frames.iter().flatten().collect();
            let unique: HashSet<_> = resident.iter().collect();
            prop_assert_eq!(resident.len(), unique.len());
            prop_assert_eq!(step.frames.len(), capacity);
            prop_assert!(step.frames.contains(&Some(step.page)));
        }
    }

    #[test]
    fn runs_are_deterministic(
        sequence in sequences(),
        capacity in 1usize..6,
        policy in policies()
    ) {
        prop_assert_eq!(
            run(&sequence, capacity, policy).unwrap(),
            run(&sequence, capacity, policy).unwrap()
        );
    }

    #[test]
    fn enough_frames_only_fault_on_first_use(
        sequence in sequences(),
        policy in policies()
    ) {
        let distinct = sequence.iter().collect::<HashSet<_>>().len();
        let capacity = distinct.max(1);
        let trace = run(&sequence, capacity, policy).unwrap();
        prop_assert_eq!(trace.summary.faults, distinct);
        prop_assert!(trace.steps.iter().all(|s| s.evicted.is_none()));
    }

    #[test]
    fn single_frame_faults_on_every_change(
        sequence in sequences(),
        policy in policies()
    ) {
        let trace = run(&sequence, 1, policy).unwrap();
        for step in &trace.steps {
            let repeat = step.index > 0 && sequence[step.index - 1] == step.page;
            prop_assert_eq!(step.is_hit(), repeat);
        }
    }

    #[test]
    fn optimal_is_never_beaten(
        sequence in sequences(),
        capacity in 1usize..6
    ) {
        let opt = run(&sequence, capacity, PolicyKind::Optimal).unwrap().summary.faults;
        prop_assert!(opt <= run(&sequence, capacity, PolicyKind::Lru).unwrap().summary.faults);
        prop_assert!(opt <= run(&sequence, capacity, PolicyKind::Fifo).unwrap().summary.faults);
    }

    #[test]
    fn fifo_hits_leave_queue_alone(
        sequence in sequences(),
        capacity in 1usize..6
    ) {
        let config = SimConfig { capacity, policy: PolicyKind::Fifo };
        let mut sim = Simulation::new(&sequence[..], config).unwrap();
        let order = |sim: &Simulation| match sim.policy() {
            Policy::Fifo(fifo) => fifo.order().collect::<Vec<_>>(),
            other => panic!("unexpected policy {:?}", other.kind()),
        };
        loop {
            let before = order(&sim);
            let Some(step) = sim.step().unwrap() else { break };
            if step.is_hit() {
                prop_assert_eq!(order(&sim), before);
            }
        }
    }

    #[test]
    fn lru_evicts_least_recently_accessed(
        sequence in sequences(),
        capacity in 1usize..6
    ) {
        let mut last_access: HashMap<usize, usize> = HashMap::new();
        for (before, step) in steps_with_prior_frames(&sequence, capacity, PolicyKind::Lru) {
            if let Some(victim) = step.evicted {
                let oldest = before
                    .iter()
                    .flatten()
                    .min_by_key(|page| last_access[*page])
                    .copied();
                prop_assert_eq!(Some(victim), oldest);
            }
            last_access.insert(step.page, step.index);
        }
    }

    #[test]
    fn optimal_evicts_furthest_next_use(
        sequence in sequences(),
        capacity in 1usize..6
    ) {
        for (before, step) in steps_with_prior_frames(&sequence, capacity, PolicyKind::Optimal) {
            let Some(victim) = step.evicted else { continue };
            let next_use = |page: usize| {
                sequence[step.index + 1..]
                    .iter()
                    .position(|&p| p == page)
                    .map_or(usize::MAX, |offset| step.index + 1 + offset)
            };
            let furthest = before.iter().flatten().map(|&p| next_use(p)).max().unwrap();
            prop_assert_eq!(next_use(victim), furthest);
            // Ties resolve to the lowest slot holding a page with that next use.
            let expected = before
                .iter()
                .flatten()
                .copied()
                .find(|&p| next_use(p) == furthest);
            prop_assert_eq!(Some(victim), expected);
        }
    }
}
