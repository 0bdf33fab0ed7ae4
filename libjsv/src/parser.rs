//! Recursive-descent value parser.
//!
//! Each function takes the input as `char`s plus a starting position and
//! returns the parsed value with the position just past it. Nothing is
//! tokenized up front; dispatch looks at the first significant character.
//! - Strings: `"..."` or `'...'`, backslash makes the next character literal
//! - Keywords: `true`, `false`, `null`, `undefined`
//! - Arrays: `[a, , b]` with elision
//! - Objects: `{name: v; 'quoted': v, [computed]: v}`
//! - Numbers: `0x1F`, `0o17`, `12`, `.5e-2`

use crate::error::{Found, Result, SyntaxError};
use crate::scanner::{scan_name, scan_number, skip_whitespace, Radix};
use crate::value::{Map, Value};
use crate::ParseOptions;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Per-call parse state: options and the current nesting depth.
#[derive(Clone, Debug)]
pub struct ParseContext {
    options: ParseOptions,
    depth: usize,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(options: ParseOptions) -> Self {
        Self { options, depth: 0 }
    }

    fn enter(&mut self, offset: usize) -> Result<()> {
        if let Some(max) = self.options.max_depth {
            if self.depth >= max {
                return Err(SyntaxError::TooDeep { depth: max, offset });
            }
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

const KEYWORDS: [&str; 4] = ["true", "false", "null", "undefined"];

fn keyword_value(word: &str) -> Value {
    match word {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => Value::Undefined,
    }
}

fn found(src: &[char], i: usize) -> Found {
    Found(src.get(i).copied())
}

/// Compare by prefix only: `trueX` matches `true` and leaves `X`.
fn starts_with_at(src: &[char], i: usize, word: &str) -> bool {
    let mut j = i;
    for ch in word.chars() {
        if src.get(j) != Some(&ch) {
            return false;
        }
        j += 1;
    }
    true
}

/// Parse the next value at or after `i` (leading whitespace is skipped).
pub fn parse_value(src: &[char], i: usize, ctx: &mut ParseContext) -> Result<(Value, usize)> {
    let i = skip_whitespace(src, i);
    let Some(&ch) = src.get(i) else {
        return Err(SyntaxError::UnexpectedEof { offset: i });
    };

    if ch == '"' || ch == '\'' {
        let (s, next) = parse_string(src, i)?;
        return Ok((Value::String(s), next));
    }

    for word in KEYWORDS {
        if starts_with_at(src, i, word) {
            return Ok((keyword_value(word), i + word.len()));
        }
    }

    match ch {
        '[' => {
            ctx.enter(i)?;
            let result = parse_array(src, i, ctx);
            ctx.leave();
            result
        }
        '{' => {
            ctx.enter(i)?;
            let result = parse_object(src, i, ctx);
            ctx.leave();
            result
        }
        _ => parse_number(src, i),
    }
}

/// Parse a quoted string at `start`, which must hold the opening quote.
fn parse_string(src: &[char], start: usize) -> Result<(String, usize)> {
    let quote = src[start];
    let mut result = String::new();
    let mut escaped = false;

    for (i, &ch) in src.iter().enumerate().skip(start + 1) {
        if escaped {
            result.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return Ok((result, i + 1));
        } else {
            result.push(ch);
        }
    }

    Err(SyntaxError::UnfinishedString { offset: start })
}

/// Parse an array at `start`, which must hold `[`.
fn parse_array(src: &[char], start: usize, ctx: &mut ParseContext) -> Result<(Value, usize)> {
    let mut items = Vec::new();
    // True while a value or an elision may go in the current slot.
    let mut allowed = true;
    // Set by a separator: the slot it opens is elided if `]` comes next.
    let mut after_comma = false;
    let mut i = skip_whitespace(src, start + 1);

    while let Some(&ch) = src.get(i) {
        match ch {
            ']' => {
                if after_comma {
                    items.push(Value::Undefined);
                }
                return Ok((Value::Array(items), i + 1));
            }
            ',' => {
                if allowed {
                    items.push(Value::Undefined);
                }
                allowed = true;
                after_comma = true;
                i += 1;
            }
            _ if !allowed => {
                return Err(SyntaxError::ExpectedArrayDelimiter {
                    found: Found(Some(ch)),
                    offset: i,
                });
            }
            _ => {
                let (value, next) = parse_value(src, i, ctx)?;
                items.push(value);
                allowed = false;
                after_comma = false;
                i = next;
            }
        }
        i = skip_whitespace(src, i);
    }

    Err(SyntaxError::UnclosedArray { offset: start })
}

/// Parse an object at `start`, which must hold `{`.
fn parse_object(src: &[char], start: usize, ctx: &mut ParseContext) -> Result<(Value, usize)> {
    let mut obj = Map::new();
    // True while a key may start here; cleared once an entry is stored.
    let mut allowed = true;
    let mut i = skip_whitespace(src, start + 1);

    while let Some(&ch) = src.get(i) {
        match ch {
            '}' => return Ok((Value::Object(obj), i + 1)),
            ',' | ';' => {
                if allowed {
                    return Err(SyntaxError::UnexpectedChar {
                        found: Found(Some(ch)),
                        offset: i,
                    });
                }
                allowed = true;
                i = skip_whitespace(src, i + 1);
                continue;
            }
            _ if !allowed => {
                return Err(SyntaxError::ExpectedObjectDelimiter {
                    found: Found(Some(ch)),
                    offset: i,
                });
            }
            _ => {}
        }

        let (key, after_key) = parse_key(src, i, ctx)?;
        i = skip_whitespace(src, after_key);
        if src.get(i) != Some(&':') {
            return Err(SyntaxError::ExpectedColon {
                found: found(src, i),
                offset: i,
            });
        }

        let (value, next) = parse_value(src, i + 1, ctx)?;
        obj.insert(key, value);
        allowed = false;
        i = skip_whitespace(src, next);
    }

    Err(SyntaxError::UnclosedObject { offset: start })
}

/// Parse an object key at `i`: computed `[value]`, quoted string, or bare name.
fn parse_key(src: &[char], i: usize, ctx: &mut ParseContext) -> Result<(Value, usize)> {
    match src[i] {
        '[' => {
            ctx.enter(i)?;
            let inner = parse_value(src, i + 1, ctx);
            ctx.leave();
            let (key, next) = inner?;
            let close = skip_whitespace(src, next);
            if src.get(close) != Some(&']') {
                return Err(SyntaxError::UnclosedComputedKey {
                    found: found(src, close),
                    offset: close,
                });
            }
            Ok((key, close + 1))
        }
        '"' | '\'' => {
            let (s, next) = parse_string(src, i)?;
            Ok((Value::String(s), next))
        }
        ch => match scan_name(src, i) {
            Some(end) => Ok((Value::String(src[i..end].iter().collect()), end)),
            None => Err(SyntaxError::UnexpectedChar {
                found: Found(Some(ch)),
                offset: i,
            }),
        },
    }
}

/// Parse a numeric literal at `start`. Anything that is not one is an
/// unexpected character.
fn parse_number(src: &[char], start: usize) -> Result<(Value, usize)> {
    let Some((radix, end)) = scan_number(src, start) else {
        return Err(SyntaxError::UnexpectedChar {
            found: found(src, start),
            offset: start,
        });
    };
    let text: String = src[start..end].iter().collect();

    let number = match radix {
        Radix::Hex | Radix::Octal => BigInt::parse_bytes(text[2..].as_bytes(), radix.base())
            .and_then(|n| n.to_f64()),
        Radix::Decimal if text.starts_with('.') => format!("0{}", text).parse::<f64>().ok(),
        Radix::Decimal => text.parse::<f64>().ok(),
    };

    match number {
        Some(n) => Ok((Value::Number(n), end)),
        None => Err(SyntaxError::InvalidNumber {
            text,
            offset: start,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_at(input: &str, start: usize) -> Result<(Value, usize)> {
        let src: Vec<char> = input.chars().collect();
        parse_value(&src, start, &mut ParseContext::new(ParseOptions::default()))
    }

    fn value(input: &str) -> Value {
        parse_at(input, 0).unwrap().0
    }

    fn error(input: &str) -> SyntaxError {
        parse_at(input, 0).unwrap_err()
    }

    #[test]
    fn test_end_offsets() {
        assert_eq!(parse_at("  123 ", 0).unwrap(), (Value::Number(123.0), 5));
        assert_eq!(parse_at("[1] [2]", 3).unwrap().1, 7);
        assert_eq!(parse_at("'ab'x", 0).unwrap().1, 4);
        assert_eq!(parse_at("undefined", 0).unwrap().1, 9);
    }

    #[test]
    fn test_keywords_are_prefix_matched() {
        assert_eq!(parse_at("trueValue", 0).unwrap(), (Value::Bool(true), 4));
        assert_eq!(parse_at("nullx", 0).unwrap(), (Value::Null, 4));
        assert_eq!(value("false"), Value::Bool(false));
        assert_eq!(value("undefined"), Value::Undefined);
    }

    #[test]
    fn test_strings() {
        assert_eq!(value("\"double\""), Value::from("double"));
        assert_eq!(value("'single'"), Value::from("single"));
        assert_eq!(value("'say \"hi\"'"), Value::from("say \"hi\""));
        assert_eq!(value(r"'a\nb'"), Value::from("anb"));
        assert_eq!(value(r"'it\'s'"), Value::from("it's"));
        assert_eq!(value(r"'\\'"), Value::from("\\"));
        assert_eq!(value("'multi\nline'"), Value::from("multi\nline"));
        assert_eq!(value("'héllo'"), Value::from("héllo"));
    }

    #[test]
    fn test_unfinished_string() {
        assert_eq!(error("  'abc"), SyntaxError::UnfinishedString { offset: 2 });
        assert_eq!(error(r"'abc\'"), SyntaxError::UnfinishedString { offset: 0 });
        assert_eq!(error("\"abc'"), SyntaxError::UnfinishedString { offset: 0 });
    }

    #[test]
    fn test_numbers() {
        assert_eq!(value("0x1F"), Value::Number(31.0));
        assert_eq!(value("0xcafebabe"), Value::Number(3405691582.0));
        assert_eq!(value("0o17"), Value::Number(15.0));
        assert_eq!(value("0o666"), Value::Number(438.0));
        assert_eq!(value(".5e-2"), Value::Number(0.005));
        assert_eq!(value("1e3"), Value::Number(1000.0));
        assert_eq!(value("3.1415e+0"), Value::Number(3.1415));
        assert_eq!(value("007"), Value::Number(7.0));
    }

    #[test]
    fn test_long_hex_converts_to_nearest_float() {
        assert_eq!(value("0x10000000000000000"), Value::Number(18446744073709551616.0));
    }

    #[test]
    fn test_number_leaves_dangling_dot() {
        assert_eq!(parse_at("1.", 0).unwrap(), (Value::Number(1.0), 1));
        assert_eq!(parse_at("0x", 0).unwrap(), (Value::Number(0.0), 1));
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            error("  @"),
            SyntaxError::UnexpectedChar {
                found: Found(Some('@')),
                offset: 2
            }
        );
        assert_eq!(
            error("-1"),
            SyntaxError::UnexpectedChar {
                found: Found(Some('-')),
                offset: 0
            }
        );
    }

    #[test]
    fn test_whitespace_only_is_eof() {
        assert_eq!(error(""), SyntaxError::UnexpectedEof { offset: 0 });
        assert_eq!(error(" \n "), SyntaxError::UnexpectedEof { offset: 3 });
    }

    #[test]
    fn test_tab_is_not_whitespace() {
        assert_eq!(
            error("\t1"),
            SyntaxError::UnexpectedChar {
                found: Found(Some('\t')),
                offset: 0
            }
        );
    }

    #[test]
    fn test_array_elision() {
        assert_eq!(
            value("[1,,3]"),
            Value::Array(vec![1.into(), Value::Undefined, 3.into()])
        );
        assert_eq!(value("[1,]"), Value::Array(vec![1.into(), Value::Undefined]));
        assert_eq!(value("[,]"), Value::Array(vec![Value::Undefined, Value::Undefined]));
        assert_eq!(value("[ ]"), Value::Array(vec![]));
    }

    #[test]
    fn test_array_errors() {
        assert_eq!(
            error("[1 2]"),
            SyntaxError::ExpectedArrayDelimiter {
                found: Found(Some('2')),
                offset: 3
            }
        );
        assert_eq!(error("  [1, 2"), SyntaxError::UnclosedArray { offset: 2 });
        assert_eq!(error("[1,"), SyntaxError::UnclosedArray { offset: 0 });
        assert_eq!(
            error("[1.]"),
            SyntaxError::ExpectedArrayDelimiter {
                found: Found(Some('.')),
                offset: 2
            }
        );
    }

    #[test]
    fn test_object_keys() {
        let expected = Value::Object(Map::from([("a", 1)]));
        assert_eq!(value("{a:1}"), expected);
        assert_eq!(value("{'a':1}"), expected);
        assert_eq!(value("{\"a\":1}"), expected);
        assert_eq!(value("{[\"a\"]:1}"), expected);
        assert_eq!(value("{ [ 'a' ] : 1 }"), expected);
    }

    #[test]
    fn test_object_computed_keys_keep_their_value() {
        let obj = value("{[5]: 'five', [[1, 2]]: 'pair', [{x: 1}]: 'obj'}");
        let obj = obj.as_object().unwrap();
        assert_eq!(obj.get(&Value::Number(5.0)), Some(&Value::from("five")));
        assert_eq!(
            obj.get(&Value::Array(vec![1.into(), 2.into()])),
            Some(&Value::from("pair"))
        );
        assert_eq!(
            obj.get(&Value::Object(Map::from([("x", 1)]))),
            Some(&Value::from("obj"))
        );
    }

    #[test]
    fn test_object_separators() {
        assert_eq!(
            value("{a:1; b:2}"),
            Value::Object(Map::from([("a", 1), ("b", 2)]))
        );
        assert_eq!(
            value("{a:1, b:2,}"),
            Value::Object(Map::from([("a", 1), ("b", 2)]))
        );
    }

    #[test]
    fn test_object_duplicate_keys_overwrite() {
        let obj = value("{a: 1, b: 2, a: 3}");
        let obj = obj.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.get_str("a"), Some(&Value::Number(3.0)));
        assert_eq!(obj.keys().next(), Some(&Value::from("a")));
    }

    #[test]
    fn test_object_errors() {
        assert_eq!(
            error("{,}"),
            SyntaxError::UnexpectedChar {
                found: Found(Some(',')),
                offset: 1
            }
        );
        assert_eq!(
            error("{a:1,,}"),
            SyntaxError::UnexpectedChar {
                found: Found(Some(',')),
                offset: 5
            }
        );
        assert_eq!(
            error("{a:1 b:2}"),
            SyntaxError::ExpectedObjectDelimiter {
                found: Found(Some('b')),
                offset: 5
            }
        );
        assert_eq!(
            error("{a 1}"),
            SyntaxError::ExpectedColon {
                found: Found(Some('1')),
                offset: 3
            }
        );
        assert_eq!(
            error("{a"),
            SyntaxError::ExpectedColon {
                found: Found(None),
                offset: 2
            }
        );
        assert_eq!(
            error("{[1 : 2}"),
            SyntaxError::UnclosedComputedKey {
                found: Found(Some(':')),
                offset: 4
            }
        );
        assert_eq!(
            error("{1: 2}"),
            SyntaxError::UnexpectedChar {
                found: Found(Some('1')),
                offset: 1
            }
        );
        assert_eq!(error(" {a: 1"), SyntaxError::UnclosedObject { offset: 1 });
    }

    #[test]
    fn test_unterminated_string_in_object_points_at_quote() {
        assert_eq!(
            error("{a: 'x, b: 2}"),
            SyntaxError::UnfinishedString { offset: 4 }
        );
    }

    #[test]
    fn test_offsets_count_characters() {
        assert_eq!(
            error("['é', @]"),
            SyntaxError::UnexpectedChar {
                found: Found(Some('@')),
                offset: 6
            }
        );
    }

    #[test]
    fn test_depth_limit() {
        let src: Vec<char> = "[[[1]]]".chars().collect();
        let options = ParseOptions { max_depth: Some(2) };
        assert_eq!(
            parse_value(&src, 0, &mut ParseContext::new(options)).unwrap_err(),
            SyntaxError::TooDeep {
                depth: 2,
                offset: 2
            }
        );

        let options = ParseOptions { max_depth: Some(3) };
        assert!(parse_value(&src, 0, &mut ParseContext::new(options)).is_ok());

        let src: Vec<char> = "{[[1]]: 2}".chars().collect();
        let options = ParseOptions { max_depth: Some(2) };
        assert_eq!(
            parse_value(&src, 0, &mut ParseContext::new(options)).unwrap_err(),
            SyntaxError::TooDeep {
                depth: 2,
                offset: 2
            }
        );
    }

    #[test]
    fn test_depth_unbounded() {
        let input = format!("{}{}", "[".repeat(300), "]".repeat(300));
        let src: Vec<char> = input.chars().collect();
        let options = ParseOptions { max_depth: None };
        assert!(parse_value(&src, 0, &mut ParseContext::new(options)).is_ok());
    }
}
