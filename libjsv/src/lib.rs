//! JSV (JavaScript Value notation) parser.
//!
//! JSV is a superset of JSON that reads like JavaScript literals:
//!
//! - Object keys may be bare names (`{a: 1}`), quoted with `"` or `'`, or
//!   computed from any value (`{[[1, 2]]: 'pair'}`)
//! - `,` and `;` both separate object entries
//! - `undefined` is a value, and array slots may be elided (`[1,,3]`)
//! - Numbers may be hexadecimal (`0x1F`), octal (`0o17`) or scientific
//!   (`.5e-2`)
//!
//! # Parsing
//!
//! The parser is a single-pass recursive descent over the input's
//! characters; there is no separate tokenizer. Every failure is a
//! [`SyntaxError`] carrying the character offset where the grammar was
//! violated, which [`render_context`] turns into a readable excerpt:
//!
//! ```
//! use libjsv::{parse, render_context};
//!
//! let input = "{a: 1,\n b: 'x}";
//! let err = parse(input).unwrap_err();
//! assert_eq!(err.offset(), 11);
//! assert_eq!(render_context(input, err.offset()), "1|{a: 1,\n2| b: 'x}\n      ^");
//! ```

mod context;
mod error;
mod parser;
mod scanner;
mod stream;
mod value;

pub use context::{render_context, render_context_with, DEFAULT_CONTEXT_LINES};
pub use error::{Found, Result, SyntaxError};
pub use scanner::escape_for_display;
pub use stream::Values;
pub use value::{Map, Value};

use parser::ParseContext;
use scanner::skip_whitespace;

/// Nesting limit applied by [`ParseOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parser configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed nesting of arrays, objects and computed keys.
    /// `None` lets recursion follow the input.
    pub max_depth: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

/// Parse a JSV document holding exactly one value.
///
/// # Example
///
/// ```
/// use libjsv::{parse, Value};
///
/// assert_eq!(parse("0x1F").unwrap(), Value::Number(31.0));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parse_with_options(input, ParseOptions::default())
}

/// Parse a JSV document holding exactly one value.
///
/// Only whitespace may follow the value.
pub fn parse_with_options(input: &str, options: ParseOptions) -> Result<Value> {
    tracing::trace!(len = input.len(), "parsing document");
    let src: Vec<char> = input.chars().collect();
    let mut ctx = ParseContext::new(options);

    let result = parser::parse_value(&src, 0, &mut ctx).and_then(|(value, end)| {
        let i = skip_whitespace(&src, end);
        match src.get(i) {
            Some(&ch) => Err(SyntaxError::UnexpectedChar {
                found: Found(Some(ch)),
                offset: i,
            }),
            None => Ok(value),
        }
    });

    if let Err(err) = &result {
        tracing::debug!(offset = err.offset(), %err, "parse failed");
    }
    result
}

/// Parse the next value at or after character offset `start`.
///
/// Returns the value and the offset just past it. Anything after the value
/// is left alone.
pub fn parse_value(input: &str, start: usize) -> Result<(Value, usize)> {
    parse_value_with_options(input, start, ParseOptions::default())
}

/// Parse the next value at or after character offset `start`.
pub fn parse_value_with_options(
    input: &str,
    start: usize,
    options: ParseOptions,
) -> Result<(Value, usize)> {
    let src: Vec<char> = input.chars().collect();
    parser::parse_value(&src, start, &mut ParseContext::new(options))
}

/// Parse every whitespace-separated value in `input`.
///
/// An input holding only whitespace yields no values.
pub fn parse_all(input: &str) -> Result<Vec<Value>> {
    parse_all_with_options(input, ParseOptions::default())
}

/// Parse every whitespace-separated value in `input`.
pub fn parse_all_with_options(input: &str, options: ParseOptions) -> Result<Vec<Value>> {
    tracing::trace!(len = input.len(), "parsing stream");
    Values::with_options(input, options).collect()
}
