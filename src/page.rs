use std::{collections::HashSet, ops::Deref, sync::Arc};

use serde::Serialize;

/// A page number. Only ever compared for equality.
pub type Page = usize;

/// The accesses of one process in time order.
///
/// Cloning is cheap (shared storage), so the same sequence can be handed to
/// several simulations without copying the pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReferenceSequence(Arc<[Page]>);

impl ReferenceSequence {
    pub fn new(pages: impl Into<Arc<[Page]>>) -> Self {
        Self(pages.into())
    }

    pub fn pages(&self) -> &[Page] {
        &self.0
    }

    /// Number of different pages referenced.
    pub fn distinct(&self) -> usize {
        self.0.iter().collect::<HashSet<_>>().len()
    }
}

impl Deref for ReferenceSequence {
    type Target = [Page];

    fn deref(&self) -> &[Page] {
        &self.0
    }
}

impl From<Vec<Page>> for ReferenceSequence {
    fn from(pages: Vec<Page>) -> Self {
        Self::new(pages)
    }
}

impl From<&[Page]> for ReferenceSequence {
    fn from(pages: &[Page]) -> Self {
        Self::new(pages)
    }
}
