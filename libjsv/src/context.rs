//! Error excerpts: a few numbered lines around an offset with a caret under
//! the offending character.
//!
//! ```text
//! 3|    true, false,
//! 4|    {a: 'ok' 'not'}
//!            ^
//! 5|]
//! ```
//!
//! The input is scanned forward once. Only the lines that will be printed
//! are remembered, so the cost does not depend on how much input follows
//! the excerpt and memory stays bounded by `2 * context_lines + 1` lines.

use std::collections::VecDeque;

/// Lines shown before and after the offending line by [`render_context`].
pub const DEFAULT_CONTEXT_LINES: usize = 2;

/// A line of the input, without its terminating `\n`.
#[derive(Clone, Copy, Debug)]
struct Line {
    /// Zero-based line number.
    number: usize,
    /// Byte range in the input.
    start: usize,
    end: usize,
    /// Character offset of the first character.
    first_char: usize,
}

/// Render [`DEFAULT_CONTEXT_LINES`] lines of context around the character
/// at `offset`.
pub fn render_context(input: &str, offset: usize) -> String {
    render_context_with(input, offset, DEFAULT_CONTEXT_LINES)
}

/// Render `context_lines` lines before and after the line holding the
/// character at `offset`, each prefixed by its 1-based number and `|`,
/// with a caret line under the offending character.
///
/// Offsets are in characters. An offset past the end points just after the
/// last character.
pub fn render_context_with(input: &str, offset: usize, context_lines: usize) -> String {
    let (window, target) = collect_window(input, offset, context_lines);

    let width = window
        .back()
        .map_or(1, |line| (line.number + 1).to_string().len());

    let mut out: Vec<String> = Vec::with_capacity(window.len() + 1);
    for line in &window {
        let text = &input[line.start..line.end];
        let text = text.strip_suffix('\r').unwrap_or(text);
        out.push(format!("{:>width$}|{}", line.number + 1, text, width = width));
        if line.number == target {
            let column = offset.min(line.first_char + input[line.start..line.end].chars().count())
                - line.first_char;
            out.push(format!("{}^", " ".repeat(width + 1 + column)));
        }
    }
    out.join("\n")
}

/// Scan until `context_lines` lines past the target line (or the end of
/// input), keeping only the lines to print. Returns them with the target
/// line number.
fn collect_window(input: &str, offset: usize, context_lines: usize) -> (VecDeque<Line>, usize) {
    let mut window: VecDeque<Line> = VecDeque::with_capacity(2 * context_lines + 1);
    let mut target: Option<usize> = None;
    let mut number = 0;
    let mut start = 0;
    let mut first_char = 0;

    for (char_index, (byte_index, ch)) in input.char_indices().enumerate() {
        if ch != '\n' {
            continue;
        }
        window.push_back(Line {
            number,
            start,
            end: byte_index,
            first_char,
        });
        if target.is_none() && char_index >= offset {
            target = Some(number);
        }
        match target {
            Some(t) if number - t == context_lines => return (window, t),
            Some(_) => {}
            None if window.len() > context_lines => {
                window.pop_front();
            }
            None => {}
        }
        number += 1;
        start = byte_index + 1;
        first_char = char_index + 1;
    }

    // End of input terminates the last line.
    window.push_back(Line {
        number,
        start,
        end: input.len(),
        first_char,
    });
    (window, target.unwrap_or(number))
}
