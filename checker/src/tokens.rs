//! Whitespace-delimited token reader over an in-memory buffer.
//!
//! Datasets and solutions are plain text: integers and words separated by
//! spaces or newlines. Line structure carries no meaning. Tokens are produced
//! lazily so a validator stops reading at the first violation.

use std::str::SplitAsciiWhitespace;

use thiserror::Error;

/// Why a token could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The stream ended before the expected token.
    #[error("unexpected end of file")]
    EndOfInput,
    /// A token was present but is not a valid integer.
    #[error("malformed integer '{token}'")]
    Malformed { token: String },
}

/// Lazily yields tokens from a text buffer.
pub struct Tokens<'a> {
    inner: SplitAsciiWhitespace<'a>,
    consumed: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_ascii_whitespace(),
            consumed: 0,
        }
    }

    /// Next raw token.
    pub fn next_word(&mut self) -> Result<&'a str, TokenError> {
        let token = self.inner.next().ok_or(TokenError::EndOfInput)?;
        self.consumed += 1;
        Ok(token)
    }

    /// Next token parsed as a signed decimal integer.
    ///
    /// Values outside `i64` are reported as malformed; range checks against
    /// problem bounds happen in the validators.
    pub fn next_int(&mut self) -> Result<i64, TokenError> {
        let token = self.next_word()?;
        token.parse::<i64>().map_err(|_| TokenError::Malformed {
            token: token.to_string(),
        })
    }

    /// Number of tokens consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}
