//! Error types for wordflip.
//!
//! Library code returns [`Error`]; the command-line layer wraps it in
//! `anyhow` for context and exit status.

use std::io;
use std::path::PathBuf;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Thread count (or another setting) is out of bounds.
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Merged configuration could not be extracted.
    #[error("Invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Input could not be opened or its size determined.
    #[error("Cannot open input {}: {source}", .path.display())]
    OpenInput { path: PathBuf, source: io::Error },

    /// Output could not be created or truncated.
    #[error("Cannot create output {}: {source}", .path.display())]
    CreateOutput { path: PathBuf, source: io::Error },

    /// Scanning the input for range boundaries failed.
    #[error("Failed to read input while partitioning: {0}")]
    Read(#[source] io::Error),

    /// A worker could not read its assigned range.
    #[error("Range {index} could not be read: {source}")]
    RangeFailed { index: usize, source: io::Error },

    /// The output sink rejected a write or flush.
    #[error("Output is not writable: {0}")]
    SinkWrite(#[source] io::Error),

    /// One or more ranges were committed empty because their worker failed.
    #[error("Output is incomplete, ranges {failed:?} failed")]
    Incomplete { failed: Vec<usize> },
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}
