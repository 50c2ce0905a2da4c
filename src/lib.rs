//! # wordflip - parallel, order-preserving word reversal
//!
//! wordflip reverses every space-separated word of a text file. The file is
//! cut into one word-aligned slice per worker thread, the slices are
//! processed concurrently, and an ordering gate appends each slice's output
//! strictly in slice order, so the result matches a single-threaded pass.
//!
//! ## Quick Start
//!
//! ```bash
//! # Reverse input.txt into output.txt with the default 4 threads
//! wordflip
//!
//! # Use 16 threads and explicit files
//! wordflip 16 --input book.txt --output koob.txt
//! ```
//!
//! ## Library Usage
//!
//! ```rust
//! use wordflip::parallel::{RunOptions, reverse_source};
//!
//! let input: &[u8] = b"ab cd\nef";
//! let options = RunOptions { threads: 2, trailing_space: true };
//! let (_report, output) = reverse_source(&input, Vec::new(), options)?;
//! assert_eq!(output, b"ba dc\nfe ");
//! # Ok::<(), wordflip::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod parallel;
pub mod slice;

pub use cli::Cli;
pub use config::WordflipConfig;
pub use error::{Error, Result};
