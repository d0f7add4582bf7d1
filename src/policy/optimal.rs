use std::collections::HashMap;

use super::Replacer;
use crate::{frames::FrameSet, page::Page};

/// Belady's optimal policy: evicts the resident page whose next reference is
/// furthest in the future, or never comes.
#[derive(Debug, Clone)]
pub struct Optimal {
    /// `next_use[i]` is the position of the next reference to `sequence[i]`
    /// after `i`.
    next_use: Vec<Option<usize>>,
    /// Next reference of each resident page, taken from `next_use` at its
    /// latest access.
    upcoming: HashMap<Page, Option<usize>>,
}

impl Optimal {
    pub fn new(sequence: &[Page]) -> Self {
        let mut next_use = vec![None; sequence.len()];
        let mut seen: HashMap<Page, usize> = HashMap::new();
        for (position, &page) in sequence.iter().enumerate().rev() {
            next_use[position] = seen.insert(page, position);
        }
        Self {
            next_use,
            upcoming: HashMap::new(),
        }
    }

    /// Next position after the latest access where `page` is referenced again.
    pub fn next_occurrence(&self, page: Page) -> Option<usize> {
        self.upcoming.get(&page).copied().flatten()
    }

    fn record(&mut self, page: Page, position: usize) {
        let next = self.next_use.get(position).copied().flatten();
        self.upcoming.insert(page, next);
    }
}

impl Replacer for Optimal {
    fn touch(&mut self, page: Page, position: usize) {
        self.record(page, position);
    }

    fn admit(&mut self, page: Page, position: usize) {
        self.record(page, position);
    }

    fn evict(&mut self, frames: &FrameSet, position: usize) -> Option<Page> {
        let mut victim: Option<(Page, usize)> = None;
        // Slot order, and only a strictly later use replaces the candidate, so
        // ties between never-used-again pages go to the lowest slot.
        for page in frames.resident() {
            let next = self.next_occurrence(page).unwrap_or(usize::MAX);
            debug_assert!(next > position, "stale lookahead for page {page}");
            if victim.map_or(true, |(_, furthest)| next > furthest) {
                victim = Some((page, next));
            }
        }
        let (page, _) = victim?;
        self.upcoming.remove(&page);
        Some(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(optimal: &mut Optimal, sequence: &[Page], capacity: usize) -> FrameSet {
        let mut frames = FrameSet::new(capacity).unwrap();
        for (position, &page) in sequence.iter().enumerate().take(capacity) {
            frames.place(page).unwrap();
            optimal.admit(page, position);
        }
        frames
    }

    #[test]
    fn next_use_table_from_backward_pass() {
        let optimal = Optimal::new(&[1, 2, 1, 3, 2, 1]);
        assert_eq!(
            optimal.next_use,
            vec![Some(2), Some(4), Some(5), None, None, None]
        );
    }

    #[test]
    fn evicts_page_used_furthest_ahead() {
        let sequence = [1, 2, 3, 4, 2, 1, 3];
        let mut optimal = Optimal::new(&sequence);
        let frames = load(&mut optimal, &sequence, 3);
        assert_eq!(optimal.next_occurrence(1), Some(5));
        assert_eq!(optimal.next_occurrence(2), Some(4));
        assert_eq!(optimal.next_occurrence(3), Some(6));
        assert_eq!(optimal.evict(&frames, 3), Some(3));
    }

    #[test]
    fn page_never_used_again_is_evicted_first() {
        let sequence = [1, 2, 3, 4, 1, 2];
        let mut optimal = Optimal::new(&sequence);
        let frames = load(&mut optimal, &sequence, 3);
        assert_eq!(optimal.evict(&frames, 3), Some(3));
    }

    #[test]
    fn ties_go_to_lowest_slot() {
        let sequence = [5, 6, 7, 8];
        let mut optimal = Optimal::new(&sequence);
        let frames = load(&mut optimal, &sequence, 3);
        assert_eq!(optimal.evict(&frames, 3), Some(5));
    }

    #[test]
    fn touch_refreshes_lookahead() {
        let sequence = [1, 2, 1, 3, 1];
        let mut optimal = Optimal::new(&sequence);
        let _ = load(&mut optimal, &sequence, 2);
        assert_eq!(optimal.next_occurrence(1), Some(2));
        optimal.touch(1, 2);
        assert_eq!(optimal.next_occurrence(1), Some(4));
    }
}
