//! Word-aligned slicing of the input and per-slice word reversal.
//!
//! The input is cut into [`Range`]s whose boundaries never fall inside a
//! word, and each range is turned into an ordered list of [`Token`]s by
//! [`process_range`]. Only `' '` and `'\n'` count as whitespace; tabs and
//! carriage returns are ordinary word bytes and get reversed with the rest
//! of the word.

pub mod partition;
pub mod processor;
pub mod token;

// Re-export main types for easier access
pub use partition::{Range, partition};
pub use processor::process_range;
pub use token::{Token, is_whitespace, reverse_word};
