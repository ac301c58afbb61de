//! Value coercion: raw value text into a typed [`Value`].
//!
//! Coercion is a pure function over the value text plus an optional explicit
//! hint. Without a hint, auto-detection runs in a fixed priority order: zPath
//! reference, flow list, flow object, bare number (inside flow containers
//! only), the `null` literal, then plain string. Booleans are never
//! auto-detected; they exist only behind the `(bool)` hint.
//!
//! Bare scalars directly after a colon stay strings. `port: 8080` is the
//! string `"8080"`; only an element inside `[...]`/`{...}` auto-detects as a
//! number.
//!
//! ## Examples
//!
//! ```rust
//! use zolo::{loads, Format, Value};
//!
//! let doc = loads("a: [1, 2]\nb: null\nc: @.users.alice", Format::Zolo).unwrap();
//! assert_eq!(doc.get("a").unwrap().as_list().unwrap()[0], Value::Number(1.0));
//! assert!(doc.get("b").unwrap().is_null());
//! assert_eq!(doc.get("c").unwrap().as_zpath(), Some("@.users.alice"));
//! ```

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::map::ZoloMap;
use crate::value::Value;

/// The closed type-hint vocabulary.
///
/// `Date`, `Time`, `Url`, and `Path` are semantic tags: the value passes
/// through as a string with no extra validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    Int,
    Float,
    Bool,
    Str,
    List,
    Dict,
    Null,
    Raw,
    Date,
    Time,
    Url,
    Path,
}

impl TypeHint {
    /// Returns the lowercase name as written in a document.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TypeHint::Int => "int",
            TypeHint::Float => "float",
            TypeHint::Bool => "bool",
            TypeHint::Str => "str",
            TypeHint::List => "list",
            TypeHint::Dict => "dict",
            TypeHint::Null => "null",
            TypeHint::Raw => "raw",
            TypeHint::Date => "date",
            TypeHint::Time => "time",
            TypeHint::Url => "url",
            TypeHint::Path => "path",
        }
    }
}

impl FromStr for TypeHint {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        Ok(match s {
            "int" => TypeHint::Int,
            "float" => TypeHint::Float,
            "bool" => TypeHint::Bool,
            "str" => TypeHint::Str,
            "list" => TypeHint::List,
            "dict" => TypeHint::Dict,
            "null" => TypeHint::Null,
            "raw" => TypeHint::Raw,
            "date" => TypeHint::Date,
            "time" => TypeHint::Time,
            "url" => TypeHint::Url,
            "path" => TypeHint::Path,
            _ => return Err(()),
        })
    }
}

impl std::fmt::Display for TypeHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a value sits: directly after a colon, or inside a flow container.
///
/// Number auto-detection only fires in flow position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Leaf,
    Flow,
}

/// Coerces raw value text into a typed value.
///
/// `line` is the 0-based source line, used only for error messages. Fails
/// only when an explicit hint cannot be satisfied, a flow object repeats a
/// key, or a raw non-ASCII character appears in string text.
pub fn coerce(raw: &str, hint: Option<TypeHint>, position: Position, line: usize) -> Result<Value> {
    match hint {
        None => auto_detect(raw, position, line),
        Some(TypeHint::Int) => {
            let n: i64 = raw
                .trim()
                .parse()
                .map_err(|_| Error::hint_mismatch(raw, "int", line))?;
            Ok(Value::Number(n as f64))
        }
        Some(TypeHint::Float) => {
            let n: f64 = raw
                .trim()
                .parse()
                .map_err(|_| Error::hint_mismatch(raw, "float", line))?;
            Ok(Value::Number(n))
        }
        Some(TypeHint::Bool) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(Value::Bool(true)),
            "false" | "no" | "0" | "off" => Ok(Value::Bool(false)),
            _ => Err(Error::hint_mismatch(raw, "bool", line)),
        },
        Some(TypeHint::Null) => Ok(Value::Null),
        Some(TypeHint::Raw) => Ok(Value::String(raw.to_string())),
        Some(TypeHint::Str | TypeHint::Date | TypeHint::Time | TypeHint::Url | TypeHint::Path) => {
            Ok(Value::String(decode_string(raw, line)?))
        }
        Some(TypeHint::List) => match auto_detect(raw, position, line)? {
            v @ Value::List(_) => Ok(v),
            _ => Err(Error::hint_mismatch(raw, "list", line)),
        },
        Some(TypeHint::Dict) => match auto_detect(raw, position, line)? {
            v @ Value::Map(_) => Ok(v),
            _ => Err(Error::hint_mismatch(raw, "dict", line)),
        },
    }
}

fn auto_detect(raw: &str, position: Position, line: usize) -> Result<Value> {
    let text = raw.trim();

    if is_zpath_text(text) {
        return Ok(Value::ZPath(text.to_string()));
    }

    if let Some(inner) = enclosed(text, '[', ']') {
        let mut items = Vec::new();
        for element in split_flow(inner) {
            items.push(auto_detect(element, Position::Flow, line)?);
        }
        return Ok(Value::List(items));
    }

    if let Some(inner) = enclosed(text, '{', '}') {
        let mut map = ZoloMap::new();
        for element in split_flow(inner) {
            let (key, value) = element
                .split_once(':')
                .ok_or_else(|| Error::syntax(line, "flow object entry missing ':'"))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(Error::syntax(line, "flow object entry missing key"));
            }
            if map.contains_key(key) {
                return Err(Error::duplicate_key(key, line, line));
            }
            map.insert(key.to_string(), auto_detect(value, Position::Flow, line)?);
        }
        return Ok(Value::Map(map));
    }

    if position == Position::Flow && is_number_text(text) {
        // The grammar guarantees this parses.
        if let Ok(n) = text.parse::<f64>() {
            return Ok(Value::Number(n));
        }
    }

    if text == "null" {
        return Ok(Value::Null);
    }

    Ok(Value::String(decode_string(raw, line)?))
}

/// A zPath starts with `@` or `~`, then `.`, then at least one segment.
pub(crate) fn is_zpath_text(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some('@' | '~')) && chars.next() == Some('.') && chars.next().is_some()
}

fn enclosed(text: &str, open: char, close: char) -> Option<&str> {
    let inner = text.strip_prefix(open)?.strip_suffix(close)?;
    Some(inner)
}

/// Splits flow-container contents on top-level commas.
///
/// Commas inside nested `[]`/`{}` do not split. Commas inside embedded
/// string literals are not accounted for; `[a, "b,c"]` splits wrongly.
fn split_flow(inner: &str) -> Vec<&str> {
    if inner.trim().is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in inner.char_indices() {
        match ch {
            '[' | '{' => depth += 1,
            ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&inner[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&inner[start..]);
    parts
}

/// Checks the bare-number grammar: optional `-`, digits with no leading zero
/// (except `0` itself), optional fraction, optional exponent.
pub(crate) fn is_number_text(text: &str) -> bool {
    let mut rest = text.strip_prefix('-').unwrap_or(text);
    if rest.is_empty() {
        return false;
    }

    let int_len = rest.chars().take_while(char::is_ascii_digit).count();
    if int_len == 0 || (int_len > 1 && rest.starts_with('0')) {
        return false;
    }
    rest = &rest[int_len..];

    if let Some(frac) = rest.strip_prefix('.') {
        let frac_len = frac.chars().take_while(char::is_ascii_digit).count();
        if frac_len == 0 {
            return false;
        }
        rest = &frac[frac_len..];
    }

    if let Some(exp) = rest.strip_prefix(['e', 'E']) {
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        let exp_len = exp.chars().take_while(char::is_ascii_digit).count();
        if exp_len == 0 {
            return false;
        }
        rest = &exp[exp_len..];
    }

    rest.is_empty()
}

/// Validates and decodes plain string text.
///
/// Raw characters outside ASCII are fatal, with a ready-to-paste escape in
/// the message. `\uXXXX` escapes decode first (surrogate pairs included),
/// then the known escape set; every other backslash sequence stays literal.
pub fn decode_string(raw: &str, line: usize) -> Result<String> {
    if let Some(ch) = raw.chars().find(|c| !c.is_ascii()) {
        return Err(Error::non_ascii(ch, line));
    }

    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0usize;
    while i < chars.len() {
        if chars[i] != '\\' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        match chars.get(i + 1) {
            Some('n') => {
                out.push('\n');
                i += 2;
            }
            Some('t') => {
                out.push('\t');
                i += 2;
            }
            Some('r') => {
                out.push('\r');
                i += 2;
            }
            Some('\\') => {
                out.push('\\');
                i += 2;
            }
            Some('"') => {
                out.push('"');
                i += 2;
            }
            Some('\'') => {
                out.push('\'');
                i += 2;
            }
            Some('u') => match decode_unicode(&chars, i) {
                Some((ch, consumed)) => {
                    out.push(ch);
                    i += consumed;
                }
                None => {
                    out.push('\\');
                    i += 1;
                }
            },
            _ => {
                // Unknown escape stays literal, backslash included.
                out.push('\\');
                i += 1;
            }
        }
    }
    Ok(out)
}

/// Decodes `\uXXXX` at `chars[at..]`, pairing surrogates when the next four
/// hex digits form the low half. Returns the char and the chars consumed.
fn decode_unicode(chars: &[char], at: usize) -> Option<(char, usize)> {
    let unit = hex4(chars, at + 2)?;
    if (0xD800..0xDC00).contains(&unit) {
        // High surrogate; needs an immediately following low half.
        if chars.get(at + 6) == Some(&'\\') && chars.get(at + 7) == Some(&'u') {
            if let Some(low) = hex4(chars, at + 8) {
                if (0xDC00..0xE000).contains(&low) {
                    let combined =
                        0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                    return char::from_u32(combined).map(|ch| (ch, 12));
                }
            }
        }
        return None;
    }
    if (0xDC00..0xE000).contains(&unit) {
        return None;
    }
    char::from_u32(u32::from(unit)).map(|ch| (ch, 6))
}

fn hex4(chars: &[char], at: usize) -> Option<u16> {
    let mut value: u16 = 0;
    for offset in 0..4 {
        let digit = chars.get(at + offset)?.to_digit(16)?;
        value = (value << 4) | digit as u16;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(raw: &str) -> Value {
        coerce(raw, None, Position::Leaf, 0).unwrap()
    }

    #[test]
    fn test_bare_scalar_stays_string() {
        assert_eq!(leaf("8080"), Value::String("8080".to_string()));
        assert_eq!(leaf("true"), Value::String("true".to_string()));
        assert_eq!(leaf("yes"), Value::String("yes".to_string()));
    }

    #[test]
    fn test_null_literal() {
        assert_eq!(leaf("null"), Value::Null);
        assert_eq!(
            coerce("null", None, Position::Flow, 0).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_flow_elements_become_numbers() {
        assert_eq!(
            leaf("[1, 2, 3]"),
            Value::List(vec![
                Value::Number(1.0),
                Value::Number(2.0),
                Value::Number(3.0)
            ])
        );
    }

    #[test]
    fn test_nested_list_split_is_depth_aware() {
        let value = leaf("[1, [2, 3], 4]");
        let outer = value.as_list().unwrap();
        assert_eq!(outer.len(), 3);
        assert_eq!(outer[1].as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_flow_object() {
        let value = leaf("{x: 10, y: 20}");
        let map = value.as_map().unwrap();
        assert_eq!(map.get("x"), Some(&Value::Number(10.0)));
        assert_eq!(map.get("y"), Some(&Value::Number(20.0)));
    }

    #[test]
    fn test_flow_object_duplicate_key() {
        let err = coerce("{x: 1, x: 2}", None, Position::Leaf, 4).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { .. }));
        assert!(err.to_string().contains("line 5"));
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(leaf("[]"), Value::List(vec![]));
        assert_eq!(leaf("{}"), Value::Map(ZoloMap::new()));
    }

    #[test]
    fn test_zpath_detection() {
        assert_eq!(leaf("@.users.alice"), Value::ZPath("@.users.alice".into()));
        assert_eq!(leaf("~.session.id"), Value::ZPath("~.session.id".into()));
        // bare sigil or missing segment is ordinary text
        assert_eq!(leaf("@."), Value::String("@.".into()));
        assert_eq!(leaf("@users"), Value::String("@users".into()));
    }

    #[test]
    fn test_number_grammar() {
        assert!(is_number_text("0"));
        assert!(is_number_text("-12.5"));
        assert!(is_number_text("1e10"));
        assert!(is_number_text("0.5"));
        assert!(is_number_text("2E-3"));
        assert!(!is_number_text("012"));
        assert!(!is_number_text("1."));
        assert!(!is_number_text(".5"));
        assert!(!is_number_text("1e"));
        assert!(!is_number_text("--1"));
    }

    #[test]
    fn test_int_hint() {
        assert_eq!(
            coerce("8080", Some(TypeHint::Int), Position::Leaf, 0).unwrap(),
            Value::Number(8080.0)
        );
        let err = coerce("abc", Some(TypeHint::Int), Position::Leaf, 2).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_bool_hint_vocabulary() {
        for text in ["true", "YES", "1", "On"] {
            assert_eq!(
                coerce(text, Some(TypeHint::Bool), Position::Leaf, 0).unwrap(),
                Value::Bool(true)
            );
        }
        for text in ["false", "no", "0", "OFF"] {
            assert_eq!(
                coerce(text, Some(TypeHint::Bool), Position::Leaf, 0).unwrap(),
                Value::Bool(false)
            );
        }
        assert!(coerce("maybe", Some(TypeHint::Bool), Position::Leaf, 0).is_err());
    }

    #[test]
    fn test_null_hint_forces_null() {
        assert_eq!(
            coerce("anything", Some(TypeHint::Null), Position::Leaf, 0).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_raw_hint_suppresses_escapes() {
        assert_eq!(
            coerce(r"C:\new\table", Some(TypeHint::Raw), Position::Leaf, 0).unwrap(),
            Value::String(r"C:\new\table".to_string())
        );
    }

    #[test]
    fn test_shape_hints() {
        assert!(coerce("[1]", Some(TypeHint::List), Position::Leaf, 0).is_ok());
        assert!(coerce("plain", Some(TypeHint::List), Position::Leaf, 0).is_err());
        assert!(coerce("{a: 1}", Some(TypeHint::Dict), Position::Leaf, 0).is_ok());
        assert!(coerce("[1]", Some(TypeHint::Dict), Position::Leaf, 0).is_err());
    }

    #[test]
    fn test_passthrough_tags() {
        assert_eq!(
            coerce("2024-01-01", Some(TypeHint::Date), Position::Leaf, 0).unwrap(),
            Value::String("2024-01-01".to_string())
        );
    }

    #[test]
    fn test_known_escapes_decode() {
        assert_eq!(leaf(r"a\nb"), Value::String("a\nb".to_string()));
        assert_eq!(leaf(r"a\tb"), Value::String("a\tb".to_string()));
        assert_eq!(leaf(r#"say \"hi\""#), Value::String("say \"hi\"".to_string()));
    }

    #[test]
    fn test_unknown_escapes_stay_literal() {
        assert_eq!(leaf(r"\d+"), Value::String(r"\d+".to_string()));
        assert_eq!(leaf(r"\W"), Value::String(r"\W".to_string()));
    }

    #[test]
    fn test_unicode_escape_bmp() {
        assert_eq!(leaf(r"caf\u00E9"), Value::String("café".to_string()));
    }

    #[test]
    fn test_unicode_escape_surrogate_pair() {
        assert_eq!(leaf(r"\uD83D\uDE00"), Value::String("😀".to_string()));
    }

    #[test]
    fn test_lone_surrogate_stays_literal() {
        assert_eq!(leaf(r"\uD83D"), Value::String(r"\uD83D".to_string()));
    }

    #[test]
    fn test_non_ascii_is_fatal_with_suggestion() {
        let err = coerce("café", None, Position::Leaf, 0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("\\u00E9"));
        // the suggestion round-trips
        assert_eq!(leaf(r"caf\u00E9"), Value::String("café".to_string()));
    }

    #[test]
    fn test_escaped_backslash_before_u_is_not_unicode() {
        assert_eq!(leaf(r"\\u0041"), Value::String(r"\u0041".to_string()));
    }

    #[test]
    fn test_empty_value_is_empty_string() {
        assert_eq!(leaf(""), Value::String(String::new()));
    }
}
