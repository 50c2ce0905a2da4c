/// One unit of slice output, in order of appearance in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A word with its bytes already reversed
    Word(Vec<u8>),
    /// A newline from the input, kept in place
    Newline,
}

impl Token {
    /// Build a word token from the bytes as they appear in the input
    pub fn reversed(word: &[u8]) -> Self {
        Token::Word(reverse_word(word))
    }
}

/// Word separators. Everything else, including `\t` and `\r`, belongs to a word.
#[inline]
pub fn is_whitespace(byte: u8) -> bool {
    byte == b' ' || byte == b'\n'
}

/// Reverse the byte order of a word. Applying it twice gives the word back.
pub fn reverse_word(word: &[u8]) -> Vec<u8> {
    word.iter().rev().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_word() {
        assert_eq!(reverse_word(b"hello"), b"olleh".to_vec());
        assert_eq!(reverse_word(b"a"), b"a".to_vec());
        assert!(reverse_word(b"").is_empty());
    }

    #[test]
    fn test_reverse_is_idempotent() {
        for word in [&b"abc"[..], b"racecar", b"x", b"tab\there", b"crlf\r"] {
            assert_eq!(reverse_word(&reverse_word(word)), word.to_vec());
        }
    }

    #[test]
    fn test_only_space_and_newline_are_whitespace() {
        assert!(is_whitespace(b' '));
        assert!(is_whitespace(b'\n'));
        assert!(!is_whitespace(b'\t'));
        assert!(!is_whitespace(b'\r'));
        assert!(!is_whitespace(b'a'));
    }
}
