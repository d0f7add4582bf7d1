//! Page replacement policies.
//!
//! Every policy sees the same three events from the engine: a hit on a
//! resident page, a page being loaded into a frame, and a request for a victim
//! when all frames are occupied. Residency itself is tracked by the
//! [`FrameSet`]; policies only keep the ordering they need to pick a victim.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{frames::FrameSet, page::Page};

mod fifo;
mod lru;
mod optimal;

pub use fifo::Fifo;
pub use lru::Lru;
pub use optimal::Optimal;

pub trait Replacer {
    /// `page` was referenced at `position` and is already resident.
    fn touch(&mut self, page: Page, position: usize);

    /// `page` was loaded into a frame at `position`.
    fn admit(&mut self, page: Page, position: usize);

    /// Chooses the page to evict at `position` and drops it from the policy's
    /// bookkeeping. Returns `None` only when nothing is resident.
    fn evict(&mut self, frames: &FrameSet, position: usize) -> Option<Page>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Fifo,
    Lru,
    Optimal,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Fifo, PolicyKind::Lru, PolicyKind::Optimal];
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lru => "LRU",
            PolicyKind::Optimal => "OPT",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown replacement policy: {0}")]
pub struct UnknownPolicy(String);

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(PolicyKind::Fifo),
            "lru" => Ok(PolicyKind::Lru),
            "opt" | "optimal" => Ok(PolicyKind::Optimal),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// A policy together with its private state for one simulation run.
#[derive(Debug, Clone)]
pub enum Policy {
    Fifo(Fifo),
    Lru(Lru),
    Optimal(Optimal),
}

impl Policy {
    /// Optimal needs the whole reference sequence up front for its lookahead.
    pub fn new(kind: PolicyKind, sequence: &[Page]) -> Self {
        match kind {
            PolicyKind::Fifo => Policy::Fifo(Fifo::new()),
            PolicyKind::Lru => Policy::Lru(Lru::new()),
            PolicyKind::Optimal => Policy::Optimal(Optimal::new(sequence)),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::Fifo(_) => PolicyKind::Fifo,
            Policy::Lru(_) => PolicyKind::Lru,
            Policy::Optimal(_) => PolicyKind::Optimal,
        }
    }
}

impl Replacer for Policy {
    fn touch(&mut self, page: Page, position: usize) {
        match self {
            Policy::Fifo(p) => p.touch(page, position),
            Policy::Lru(p) => p.touch(page, position),
            Policy::Optimal(p) => p.touch(page, position),
        }
    }

    fn admit(&mut self, page: Page, position: usize) {
        match self {
            Policy::Fifo(p) => p.admit(page, position),
            Policy::Lru(p) => p.admit(page, position),
            Policy::Optimal(p) => p.admit(page, position),
        }
    }

    fn evict(&mut self, frames: &FrameSet, position: usize) -> Option<Page> {
        match self {
            Policy::Fifo(p) => p.evict(frames, position),
            Policy::Lru(p) => p.evict(frames, position),
            Policy::Optimal(p) => p.evict(frames, position),
        }
    }
}
