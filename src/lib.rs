//! Page replacement simulator.
//!
//! Replays a reference string against a fixed number of frames under FIFO,
//! LRU or Belady's optimal policy and records every access: frame contents,
//! hit or fault, and the evicted page.
//!
//! ```
//! use pagesim::{run, PolicyKind};
//!
//! let trace = run(&[1, 2, 3, 4, 1, 2, 5], 3, PolicyKind::Optimal).unwrap();
//! assert_eq!(trace.summary.faults, 5);
//! assert_eq!(trace.steps[3].evicted, Some(3));
//! ```

pub mod compare;
pub mod engine;
pub mod error;
pub mod frames;
pub mod input;
pub mod logging;
pub mod page;
pub mod policy;

// Re-export commonly used items for convenience
pub use compare::{compare, sweep, PolicyReport, Sweep, SweepPoint};
pub use engine::{run, summarize, Outcome, SimConfig, Simulation, Step, Summary, Trace};
pub use error::SimError;
pub use frames::FrameSet;
pub use input::ParseError;
pub use page::{Page, ReferenceSequence};
pub use policy::{Policy, PolicyKind, Replacer};
