//! Concurrent slice processing with ordered output
//!
//! One worker thread per [`Range`](crate::slice::Range) reads and reverses its
//! slice, then hands the tokens to the [`Sequencer`], which appends them to the
//! output strictly in range order no matter which worker finishes first.
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌─────────────┐    ┌────────┐
//! │ Coordinator │───▶│ worker 0..N  │───▶│  Sequencer  │───▶│  sink  │
//! │ partition   │    │ process_range│    │ commit(i)   │    │        │
//! └─────────────┘    └──────────────┘    └─────────────┘    └────────┘
//! ```
//!
//! Workers never touch the sink. A worker that fails to read its range still
//! commits an empty token list so later ranges are not blocked forever.

pub mod coordinator;
pub mod sequencer;
pub mod source;

// Re-export main types for easier access
pub use coordinator::{RangeReport, RunOptions, RunReport, reverse_source, run};
pub use sequencer::Sequencer;
pub use source::{ByteSource, FileSource};
