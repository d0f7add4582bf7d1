use thiserror::Error;

use crate::page::Page;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("frame capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    // Only reachable through a broken policy; valid input never gets here.
    #[error("no free frame left for page {page} (capacity {capacity})")]
    CapacityExceeded { page: Page, capacity: usize },

    #[error("victim page {0} is not resident")]
    VictimNotFound(Page),
}
