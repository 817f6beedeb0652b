//! A mark and sweep garbage collector, simulated over a toy program.
//!
//! A [`ProgramState`] holds a stack of named variables and a heap of chunks.
//! Variables are the roots; chunks may reference each other freely, cycles
//! included. A collection marks every chunk reachable from the roots and
//! then sweeps, either reporting what is garbage or reclaiming it.
//! ```rust
//! use marksweep::{Collection, Config, ProgramState, Reachability, SweepPolicy};
//!
//! let mut state = ProgramState::new(Config::default());
//!
//! let alpha = state.allocate("alpha").unwrap();
//! let beta = state.allocate("beta").unwrap();
//! let lost = state.allocate("lost").unwrap();
//!
//! state.set_var("a", Some(alpha)).unwrap();
//! state.append_reference(alpha, beta).unwrap();
//!
//! let Collection::Report(report) = state.collect_with(SweepPolicy::Report) else {
//!     unreachable!()
//! };
//!
//! assert_eq!(report.status_of(beta), Some(Reachability::Reachable));
//! assert_eq!(report.status_of(lost), Some(Reachability::Garbage));
//! ```
//!
//! Chunks are addressed by [`ChunkId`] handles rather than references. The
//! reclaim sweep frees unreachable chunks, after which their handles are
//! dangling: lookups return `None` and mutations return
//! [`GcError::DanglingHandle`].
//! ```
//! use marksweep::{ProgramState, SweepPolicy, GcError};
//!
//! let mut state = ProgramState::default();
//! let kept = state.allocate("kept").unwrap();
//! let lost = state.allocate("lost").unwrap();
//!
//! state.set_var("x", Some(kept)).unwrap();
//! state.collect_with(SweepPolicy::Reclaim);
//!
//! assert_eq!(state.heap().ids(), &[kept]);
//! assert_eq!(state.append_reference(lost, kept), Err(GcError::DanglingHandle(lost)));
//! ```
mod chunk;
mod collector;
mod config;
mod error;
mod heap;
mod metrics;
mod mutator;
mod report;
mod stack;
mod state;
mod trace;

pub use chunk::{ChunkId, EdgeLayout, HeapChunk};
pub use collector::{Collector, MarkOutcome};
pub use config::{Config, SweepPolicy, CONFIG_DEFAULT_HEAP_CAPACITY, CONFIG_DEFAULT_STACK_CAPACITY};
pub use error::{GcError, Region};
pub use heap::{FreedChunk, Heap};
pub use metrics::Metrics;
pub use mutator::Mutator;
pub use report::{Collection, Reachability, ReclaimSummary, ReportEntry, SweepReport};
pub use stack::{Stack, Var};
pub use state::ProgramState;
pub use trace::{Trace, Tracer};

#[cfg(test)]
mod test;
