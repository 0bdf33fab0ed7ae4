//! Error types for JSV parsing.

use std::fmt;

use thiserror::Error;

use crate::scanner::escape_for_display;

/// Result type for JSV parsing operations.
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// The character found where something else was expected, or the end of
/// the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Found(pub Option<char>);

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ch) => write!(f, "\"{}\"", escape_for_display(ch.encode_utf8(&mut [0; 4]))),
            None => write!(f, "end of input"),
        }
    }
}

/// Error type for JSV parsing.
///
/// Every variant carries the 0-based character offset at which the
/// violation was detected, see [`SyntaxError::offset`].
#[derive(Error, Clone, Debug, PartialEq)]
pub enum SyntaxError {
    /// Input ended where a value was expected.
    #[error("Unexpected EOF at {offset}")]
    UnexpectedEof { offset: usize },

    /// No grammar rule matches this character.
    #[error("Unexpected character {found} at {offset}")]
    UnexpectedChar { found: Found, offset: usize },

    /// String reached end of input before its closing quote.
    #[error("Unfinished string started at {offset}")]
    UnfinishedString { offset: usize },

    /// A second value in an array without a separator.
    #[error("Expected ']' or ',' after value in array at {offset} but got {found} instead")]
    ExpectedArrayDelimiter { found: Found, offset: usize },

    /// Input ended inside an array. The offset is the opening bracket.
    #[error("Expected ']' to close array at {offset}")]
    UnclosedArray { offset: usize },

    /// A second entry in an object without a separator.
    #[error("Expected '}}', ',' or ';' after value in object at {offset} but got {found} instead")]
    ExpectedObjectDelimiter { found: Found, offset: usize },

    /// Input ended inside an object. The offset is the opening brace.
    #[error("Expected '}}' to close object at {offset}")]
    UnclosedObject { offset: usize },

    /// A computed key was not followed by `]`.
    #[error("Expected ']' to close '[' in object at {offset} but got {found} instead")]
    UnclosedComputedKey { found: Found, offset: usize },

    /// An object key was not followed by `:`.
    #[error("Expected ':' after key in object at {offset} but got {found} instead")]
    ExpectedColon { found: Found, offset: usize },

    /// A numeric literal matched but could not be converted.
    #[error("Could not convert \"{text}\" to a number at {offset}")]
    InvalidNumber { text: String, offset: usize },

    /// Arrays and objects nested deeper than the configured limit.
    #[error("Nesting deeper than {depth} levels at {offset}")]
    TooDeep { depth: usize, offset: usize },
}

impl SyntaxError {
    /// Offset, in characters from the start of the input, of the violation.
    pub fn offset(&self) -> usize {
        match *self {
            SyntaxError::UnexpectedEof { offset }
            | SyntaxError::UnexpectedChar { offset, .. }
            | SyntaxError::UnfinishedString { offset }
            | SyntaxError::ExpectedArrayDelimiter { offset, .. }
            | SyntaxError::UnclosedArray { offset }
            | SyntaxError::ExpectedObjectDelimiter { offset, .. }
            | SyntaxError::UnclosedObject { offset }
            | SyntaxError::UnclosedComputedKey { offset, .. }
            | SyntaxError::ExpectedColon { offset, .. }
            | SyntaxError::InvalidNumber { offset, .. }
            | SyntaxError::TooDeep { offset, .. } => offset,
        }
    }

    /// Human-readable description, identical to the `Display` output.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
