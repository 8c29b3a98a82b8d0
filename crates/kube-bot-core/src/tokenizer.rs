//! Whitespace tokenizer for chat messages
//!
//! Quoting and escaping are not supported: `config name "a b"` yields the
//! tokens `config`, `name`, `"a` and `b"`.

use std::fmt;

/// A single whitespace-delimited word of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    position: usize,
}

impl Token {
    /// Create a token at the given zero-based position
    #[must_use]
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    /// The token's text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Zero-based index of the token within its message
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Split `text` on runs of whitespace.
///
/// Blank input yields an empty vector.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .enumerate()
        .map(|(position, word)| Token::new(word, position))
        .collect()
}
