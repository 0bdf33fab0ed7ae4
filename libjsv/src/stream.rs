//! Multiple values from one buffer.

use crate::error::Result;
use crate::parser::{parse_value, ParseContext};
use crate::scanner::skip_whitespace;
use crate::value::Value;
use crate::ParseOptions;

/// Iterator over the whitespace-separated values of an input.
///
/// Yields each value in order and stops at the end of input. After an
/// error it yields nothing more.
#[derive(Debug)]
pub struct Values {
    src: Vec<char>,
    pos: usize,
    ctx: ParseContext,
    done: bool,
}

impl Values {
    /// Iterate over the values of `input` with default options.
    pub fn new(input: &str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    /// Iterate over the values of `input`.
    pub fn with_options(input: &str, options: ParseOptions) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            ctx: ParseContext::new(options),
            done: false,
        }
    }

    /// Character offset where the next value will be looked for.
    pub fn offset(&self) -> usize {
        self.pos
    }
}

impl Iterator for Values {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        // A whitespace-only remainder would fail as unexpected EOF.
        self.pos = skip_whitespace(&self.src, self.pos);
        if self.pos >= self.src.len() {
            self.done = true;
            return None;
        }
        match parse_value(&self.src, self.pos, &mut self.ctx) {
            Ok((value, end)) => {
                tracing::trace!(start = self.pos, end, "streamed value");
                self.pos = end;
                Some(Ok(value))
            }
            Err(err) => {
                tracing::debug!(offset = err.offset(), %err, "stream parse failed");
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for Values {}
