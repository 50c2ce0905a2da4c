use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

use super::partition::Range;
use super::token::{Token, is_whitespace};

/// Turn the bytes of one range into reversed words and newline markers.
///
/// Reading stops once the position reaches `range.end`. A word that starts
/// before `end` is always read to completion, even past `end`, and belongs
/// to this range; the partitioner places boundaries between words, so this
/// only matters for ranges built by hand.
pub fn process_range<R: Read + Seek>(reader: R, range: &Range) -> io::Result<Vec<Token>> {
    let mut reader = BufReader::new(reader);
    reader.seek(SeekFrom::Start(range.start))?;

    let mut position = range.start;
    let mut tokens = Vec::new();

    while position < range.end {
        let Some(byte) = peek(&mut reader)? else {
            break;
        };

        match byte {
            b'\n' => {
                tokens.push(Token::Newline);
                reader.consume(1);
                position += 1;
            }
            b' ' => {
                reader.consume(1);
                position += 1;
            }
            _ => {
                let mut word = Vec::new();
                position += read_word(&mut reader, &mut word)?;
                tokens.push(Token::reversed(&word));
            }
        }
    }

    Ok(tokens)
}

fn peek<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    Ok(reader.fill_buf()?.first().copied())
}

/// Append bytes up to (not including) the next whitespace or EOF.
fn read_word<R: BufRead>(reader: &mut R, word: &mut Vec<u8>) -> io::Result<u64> {
    let mut read = 0u64;
    loop {
        let (consumed, done) = {
            let buf = reader.fill_buf()?;
            if buf.is_empty() {
                break;
            }
            match buf.iter().position(|b| is_whitespace(*b)) {
                Some(n) => {
                    word.extend_from_slice(&buf[..n]);
                    (n, true)
                }
                None => {
                    word.extend_from_slice(buf);
                    (buf.len(), false)
                }
            }
        };
        reader.consume(consumed);
        read += consumed as u64;
        if done {
            break;
        }
    }
    Ok(read)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn word(text: &str) -> Token {
        Token::Word(text.as_bytes().to_vec())
    }

    fn process(input: &str, start: u64, end: u64) -> Vec<Token> {
        let range = Range { index: 0, start, end };
        process_range(Cursor::new(input.as_bytes()), &range).unwrap()
    }

    #[test]
    fn test_example_slices() {
        let input = "ab cd\nef";
        assert_eq!(process(input, 0, 5), vec![word("ba"), word("dc")]);
        assert_eq!(process(input, 5, 8), vec![Token::Newline, word("fe")]);
    }

    #[test]
    fn test_whole_file_single_range() {
        let input = "ab cd\nef";
        assert_eq!(
            process(input, 0, 8),
            vec![word("ba"), word("dc"), Token::Newline, word("fe")]
        );
    }

    #[test]
    fn test_empty_range() {
        assert!(process("ab cd", 5, 5).is_empty());
        assert!(process("", 0, 0).is_empty());
    }

    #[test]
    fn test_newline_after_spaces_is_kept() {
        assert_eq!(
            process("ab   \ncd", 0, 8),
            vec![word("ba"), Token::Newline, word("dc")]
        );
    }

    #[test]
    fn test_blank_lines_are_kept() {
        assert_eq!(
            process("ab\n\n\ncd\n", 0, 9),
            vec![
                word("ba"),
                Token::Newline,
                Token::Newline,
                Token::Newline,
                word("dc"),
                Token::Newline,
            ]
        );
    }

    #[test]
    fn test_word_overrunning_end_belongs_to_this_range() {
        assert_eq!(process("abcdef gh", 0, 3), vec![word("fedcba")]);
    }

    #[test]
    fn test_range_shorter_than_input_stops_at_end() {
        assert_eq!(process("ab cd ef", 0, 3), vec![word("ba")]);
    }

    #[test]
    fn test_tabs_and_carriage_returns_stay_inside_words() {
        assert_eq!(
            process("a\tb c\r\nd", 0, 8),
            vec![word("b\ta"), word("\rc"), Token::Newline, word("d")]
        );
    }

    #[test]
    fn test_range_past_eof_stops_at_eof() {
        assert_eq!(process("ab", 0, 100), vec![word("ba")]);
    }
}
