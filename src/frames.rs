use crate::{error::SimError, page::Page};

/// Physical frames of the simulated memory.
///
/// Slots fill from the lowest index up and are never emptied again, only
/// overwritten, so slot order is the order in which frames were first used.
#[derive(Debug, Clone)]
pub struct FrameSet {
    slots: Vec<Option<Page>>,
    len: usize,
}

impl FrameSet {
    pub fn new(capacity: usize) -> Result<Self, SimError> {
        if capacity == 0 {
            return Err(SimError::InvalidCapacity(capacity));
        }
        Ok(Self {
            slots: vec![None; capacity],
            len: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    pub fn contains(&self, page: Page) -> bool {
        self.position(page).is_some()
    }

    /// Puts `page` into the first free slot and returns that slot.
    pub fn place(&mut self, page: Page) -> Result<usize, SimError> {
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(SimError::CapacityExceeded {
                page,
                capacity: self.capacity(),
            })?;
        self.slots[slot] = Some(page);
        self.len += 1;
        Ok(slot)
    }

    /// Overwrites the slot holding `victim` with `incoming`.
    pub fn replace(&mut self, victim: Page, incoming: Page) -> Result<usize, SimError> {
        let slot = self
            .position(victim)
            .ok_or(SimError::VictimNotFound(victim))?;
        self.slots[slot] = Some(incoming);
        Ok(slot)
    }

    pub fn snapshot(&self) -> Vec<Option<Page>> {
        self.slots.clone()
    }

    /// Resident pages in slot order.
    pub fn resident(&self) -> impl Iterator<Item = Page> + '_ {
        self.slots.iter().flatten().copied()
    }

    fn position(&self, page: Page) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(FrameSet::new(0).unwrap_err(), SimError::InvalidCapacity(0));
    }

    #[test]
    fn place_fills_lowest_slot_first() {
        let mut frames = FrameSet::new(3).unwrap();
        assert_eq!(frames.place(7).unwrap(), 0);
        assert_eq!(frames.place(0).unwrap(), 1);
        assert_eq!(frames.snapshot(), vec![Some(7), Some(0), None]);
        assert!(frames.contains(7));
        assert!(!frames.contains(1));
        assert_eq!(frames.len(), 2);
        assert!(!frames.is_full());
    }

    #[test]
    fn place_on_full_set_fails() {
        let mut frames = FrameSet::new(1).unwrap();
        frames.place(1).unwrap();
        assert_eq!(
            frames.place(2).unwrap_err(),
            SimError::CapacityExceeded {
                page: 2,
                capacity: 1
            }
        );
    }

    #[test]
    fn replace_keeps_slot_of_victim() {
        let mut frames = FrameSet::new(3).unwrap();
        for page in [1, 2, 3] {
            frames.place(page).unwrap();
        }
        assert_eq!(frames.replace(2, 9).unwrap(), 1);
        assert_eq!(frames.snapshot(), vec![Some(1), Some(9), Some(3)]);
        assert_eq!(frames.resident().collect::<Vec<_>>(), vec![1, 9, 3]);
        assert!(frames.is_full());
    }

    #[test]
    fn replace_missing_victim_fails() {
        let mut frames = FrameSet::new(2).unwrap();
        frames.place(1).unwrap();
        assert_eq!(frames.replace(5, 6).unwrap_err(), SimError::VictimNotFound(5));
        assert_eq!(frames.snapshot(), vec![Some(1), None]);
    }
}
