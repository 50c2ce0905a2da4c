use std::io::{self, Write};

use parking_lot::{Condvar, Mutex};

use crate::error::{Error, Result};
use crate::slice::Token;

/// Ordering gate in front of the output sink.
///
/// Each range index commits exactly once. `commit(i, ..)` sleeps on a
/// condition variable until every index below `i` has committed, appends its
/// tokens, then wakes the other waiters. The counter and the sink live behind
/// one mutex and are reachable only through `commit`.
///
/// Rendering: a word is followed by one space, except directly before a
/// newline. The pending separator is carried across commits so the output is
/// the same for any number of ranges.
pub struct Sequencer<W> {
    state: Mutex<SequencerState<W>>,
    turn: Condvar,
    ranges: usize,
    trailing_space: bool,
}

struct SequencerState<W> {
    next_to_write: usize,
    sink: W,
    pending_separator: bool,
    failed: Option<io::ErrorKind>,
}

impl<W: Write> Sequencer<W> {
    pub fn new(sink: W, ranges: usize, trailing_space: bool) -> Self {
        Self {
            state: Mutex::new(SequencerState {
                next_to_write: 0,
                sink,
                pending_separator: false,
                failed: None,
            }),
            turn: Condvar::new(),
            ranges,
            trailing_space,
        }
    }

    /// Block until it is `index`'s turn, then append `tokens` to the sink.
    ///
    /// The turn is consumed even when the write fails, so later indices
    /// never wait on a range that will not come. After a failed write every
    /// later commit skips the sink and reports the failure too.
    pub fn commit(&self, index: usize, tokens: &[Token]) -> Result<()> {
        if index >= self.ranges {
            return Err(Error::invalid(format!(
                "range {index} is out of bounds for {} ranges",
                self.ranges
            )));
        }

        let mut state = self.state.lock();
        while state.next_to_write < index {
            self.turn.wait(&mut state);
        }
        if state.next_to_write != index {
            return Err(Error::invalid(format!("range {index} was already committed")));
        }

        let failed = state.failed;
        let outcome = match failed {
            Some(kind) => Err(Error::SinkWrite(io::Error::new(
                kind,
                "output failed while writing an earlier range",
            ))),
            None => state.append(tokens).map_err(|e| {
                state.failed = Some(e.kind());
                Error::SinkWrite(e)
            }),
        };

        state.next_to_write += 1;
        drop(state);
        self.turn.notify_all();

        tracing::debug!("Range {} committed ({} tokens)", index, tokens.len());
        outcome
    }

    /// Give up `index`'s turn without writing anything
    pub fn skip(&self, index: usize) -> Result<()> {
        self.commit(index, &[])
    }

    /// Write the final separator if configured, flush, and hand back the sink.
    pub fn finish(self) -> Result<W> {
        let mut state = self.state.into_inner();

        if let Some(kind) = state.failed {
            return Err(Error::SinkWrite(io::Error::new(
                kind,
                "output failed during the run",
            )));
        }
        if state.next_to_write < self.ranges {
            return Err(Error::Incomplete {
                failed: (state.next_to_write..self.ranges).collect(),
            });
        }

        if state.pending_separator && self.trailing_space {
            state.sink.write_all(b" ").map_err(Error::SinkWrite)?;
        }
        state.sink.flush().map_err(Error::SinkWrite)?;
        Ok(state.sink)
    }
}

impl<W: Write> SequencerState<W> {
    fn append(&mut self, tokens: &[Token]) -> io::Result<()> {
        let mut rendered = Vec::new();
        for token in tokens {
            match token {
                Token::Word(word) => {
                    if self.pending_separator {
                        rendered.push(b' ');
                    }
                    rendered.extend_from_slice(word);
                    self.pending_separator = true;
                }
                Token::Newline => {
                    rendered.push(b'\n');
                    self.pending_separator = false;
                }
            }
        }
        self.sink.write_all(&rendered)
    }
}
