use std::io::{BufReader, Read, Seek, SeekFrom};

use serde::Serialize;

use super::token::is_whitespace;
use crate::error::{Error, Result};

/// A contiguous byte interval `[start, end)` of the input owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub index: usize,
    pub start: u64,
    pub end: u64,
}

impl Range {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `[0, file_size)` into exactly `thread_count` word-aligned ranges.
///
/// Range `i` nominally starts at `file_size / thread_count * i`. From that
/// point the scanner skips leading whitespace and then one whole word, so a
/// word straddling the nominal boundary stays with the earlier range. A scan
/// that runs off the end of the input puts the boundary at `file_size`, which
/// leaves the trailing ranges empty when there are fewer words than threads.
pub fn partition<R: Read + Seek>(
    reader: &mut R,
    file_size: u64,
    thread_count: usize,
) -> Result<Vec<Range>> {
    if thread_count == 0 {
        return Err(Error::invalid("thread count must be a positive integer"));
    }

    let approx_slice_size = file_size / thread_count as u64;
    let mut ranges = Vec::with_capacity(thread_count);
    let mut start = 0;

    for index in 1..thread_count {
        let nominal = approx_slice_size * index as u64;
        let boundary = if nominal >= file_size {
            file_size
        } else {
            end_of_next_word(reader, nominal)
                .map_err(Error::Read)?
                .unwrap_or(file_size)
        };
        // Nominal offsets inside one long word all resolve to that word's end
        let boundary = boundary.clamp(start, file_size);

        ranges.push(Range {
            index: index - 1,
            start,
            end: boundary,
        });
        start = boundary;
    }

    ranges.push(Range {
        index: thread_count - 1,
        start,
        end: file_size,
    });

    Ok(ranges)
}

/// Offset just past the first word at or after `from`, or `None` when the
/// input ends before that word is terminated by whitespace.
fn end_of_next_word<R: Read + Seek>(reader: &mut R, from: u64) -> std::io::Result<Option<u64>> {
    reader.seek(SeekFrom::Start(from))?;

    let mut position = from;
    let mut in_word = false;
    for byte in BufReader::new(reader).bytes() {
        if is_whitespace(byte?) {
            if in_word {
                return Ok(Some(position));
            }
        } else {
            in_word = true;
        }
        position += 1;
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ranges_for(input: &str, threads: usize) -> Vec<Range> {
        let mut cursor = Cursor::new(input.as_bytes());
        partition(&mut cursor, input.len() as u64, threads).unwrap()
    }

    fn assert_covers(ranges: &[Range], file_size: u64, threads: usize) {
        assert_eq!(ranges.len(), threads);
        assert_eq!(ranges[0].start, 0);
        assert_eq!(ranges.last().unwrap().end, file_size);
        for (i, pair) in ranges.windows(2).enumerate() {
            assert_eq!(pair[0].end, pair[1].start, "gap or overlap after range {i}");
        }
        for (i, range) in ranges.iter().enumerate() {
            assert_eq!(range.index, i);
            assert!(range.start <= range.end);
        }
    }

    #[test]
    fn test_example_boundary_lands_after_straddling_word() {
        let ranges = ranges_for("ab cd\nef", 2);
        assert_eq!(
            ranges,
            vec![
                Range { index: 0, start: 0, end: 5 },
                Range { index: 1, start: 5, end: 8 },
            ]
        );
    }

    #[test]
    fn test_single_thread_covers_everything() {
        let ranges = ranges_for("one two three", 1);
        assert_eq!(ranges, vec![Range { index: 0, start: 0, end: 13 }]);
    }

    #[test]
    fn test_empty_input() {
        let ranges = ranges_for("", 3);
        assert_covers(&ranges, 0, 3);
        assert!(ranges.iter().all(Range::is_empty));
    }

    #[test]
    fn test_more_threads_than_words() {
        let input = "alpha beta";
        let ranges = ranges_for(input, 8);
        assert_covers(&ranges, input.len() as u64, 8);
        assert!(ranges.last().unwrap().end == input.len() as u64);
        assert!(ranges.iter().filter(|r| r.is_empty()).count() >= 6);
    }

    #[test]
    fn test_long_word_swallows_several_nominal_boundaries() {
        let input = "abcdefghijklmnop q";
        let ranges = ranges_for(input, 4);
        assert_covers(&ranges, input.len() as u64, 4);
        assert_eq!(ranges[0].end, 16);
    }

    #[test]
    fn test_boundaries_never_split_words() {
        let input = "the quick brown fox\njumps over  the lazy dog\n\nand again";
        let bytes = input.as_bytes();
        for threads in 1..=input.len() + 2 {
            let ranges = ranges_for(input, threads);
            assert_covers(&ranges, input.len() as u64, threads);
            for range in &ranges[..threads - 1] {
                let end = range.end as usize;
                if end > 0 && end < bytes.len() {
                    assert!(
                        is_whitespace(bytes[end]) || is_whitespace(bytes[end - 1]),
                        "boundary {end} splits a word with {threads} threads"
                    );
                }
            }
        }
    }

    #[test]
    fn test_trailing_whitespace_only_goes_to_file_end() {
        // Nominal offset 6 is in the trailing spaces, no word follows
        let input = "word        ";
        let ranges = ranges_for(input, 2);
        assert_covers(&ranges, input.len() as u64, 2);
        assert_eq!(ranges[0].end, input.len() as u64);
        assert!(ranges[1].is_empty());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let mut cursor = Cursor::new(b"abc".as_slice());
        let err = partition(&mut cursor, 3, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }
}
