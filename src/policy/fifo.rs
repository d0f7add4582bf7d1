use linked_hash_set::LinkedHashSet;

use super::Replacer;
use crate::{frames::FrameSet, page::Page};

/// Evicts pages in the order they were loaded. Hits never reorder the queue.
#[derive(Debug, Clone)]
pub struct Fifo {
    queue: LinkedHashSet<Page>,
}

impl Fifo {
    pub fn new() -> Self {
        Self {
            queue: LinkedHashSet::new(),
        }
    }

    /// Resident pages, oldest first.
    pub fn order(&self) -> impl Iterator<Item = Page> + '_ {
        self.queue.iter().copied()
    }
}

impl Default for Fifo {
    fn default() -> Self {
        Self::new()
    }
}

impl Replacer for Fifo {
    fn touch(&mut self, _page: Page, _position: usize) {}

    fn admit(&mut self, page: Page, _position: usize) {
        self.queue.insert(page);
    }

    fn evict(&mut self, _frames: &FrameSet, _position: usize) -> Option<Page> {
        self.queue.pop_front()
    }
}
