//! Character-class scanners shared by the parser.
//!
//! All positions are indices into the input's `char`s. Scanners never fail;
//! they report how far a token extends, or `None` when nothing matches.

/// Advance past spaces, line feeds and carriage returns. Tabs are not
/// whitespace in JSV.
pub fn skip_whitespace(src: &[char], mut i: usize) -> usize {
    while i < src.len() && matches!(src[i], ' ' | '\n' | '\r') {
        i += 1;
    }
    i
}

/// Escape text the way a JSON string literal would, without the surrounding
/// quotes, so it can be embedded in a message.
pub fn escape_for_display(text: &str) -> String {
    let quoted = serde_json::Value::from(text).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_name_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

/// Match an unquoted object key: `[A-Za-z_$][0-9A-Za-z_$]*`.
/// Returns the end of the name.
pub fn scan_name(src: &[char], i: usize) -> Option<usize> {
    if i >= src.len() || !is_name_start(src[i]) {
        return None;
    }
    let mut end = i + 1;
    while end < src.len() && is_name_continue(src[end]) {
        end += 1;
    }
    Some(end)
}

/// Base of a matched numeric literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Radix {
    /// `0x` prefix; digits follow the prefix.
    Hex,
    /// `0o` prefix; digits follow the prefix.
    Octal,
    /// Decimal with optional fraction and exponent.
    Decimal,
}

impl Radix {
    pub fn base(self) -> u32 {
        match self {
            Radix::Hex => 16,
            Radix::Octal => 8,
            Radix::Decimal => 10,
        }
    }
}

fn scan_while(src: &[char], mut i: usize, pred: impl Fn(char) -> bool) -> usize {
    while i < src.len() && pred(src[i]) {
        i += 1;
    }
    i
}

/// Match a numeric literal starting at `i`. Branches are tried in order:
/// hexadecimal, octal, then decimal/scientific. Prefix letters and the
/// exponent marker are case-insensitive. Returns the radix and the end.
pub fn scan_number(src: &[char], i: usize) -> Option<(Radix, usize)> {
    let at = |j: usize| src.get(j).copied();

    if at(i) == Some('0') {
        match at(i + 1) {
            Some('x' | 'X') => {
                let end = scan_while(src, i + 2, |c| c.is_ascii_hexdigit());
                if end > i + 2 {
                    return Some((Radix::Hex, end));
                }
            }
            Some('o' | 'O') => {
                let end = scan_while(src, i + 2, |c| matches!(c, '0'..='7'));
                if end > i + 2 {
                    return Some((Radix::Octal, end));
                }
            }
            _ => {}
        }
    }

    // \d*\.?\d+ backtracks so a dot only counts when a digit follows it.
    let int_end = scan_while(src, i, |c| c.is_ascii_digit());
    let mut end = if at(int_end) == Some('.') && at(int_end + 1).is_some_and(|c| c.is_ascii_digit())
    {
        scan_while(src, int_end + 1, |c| c.is_ascii_digit())
    } else if int_end > i {
        int_end
    } else {
        return None;
    };

    if matches!(at(end), Some('e' | 'E')) {
        let mut digits = end + 1;
        if matches!(at(digits), Some('+' | '-')) {
            digits += 1;
        }
        let exp_end = scan_while(src, digits, |c| c.is_ascii_digit());
        if exp_end > digits {
            end = exp_end;
        }
    }

    Some((Radix::Decimal, end))
}
