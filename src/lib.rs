//! # zolo
//!
//! A parser and semantic tokenizer for the zolo configuration format.
//!
//! ## What is zolo?
//!
//! zolo is a line-oriented, indentation-sensitive configuration language.
//! Every line is a `key: value` pair; nesting follows indentation; a
//! parenthesized type hint on a key (`port(int): 8080`) selects explicit
//! coercion instead of the conservative auto-detection. The same engine that
//! builds the data tree also produces position-exact semantic tokens and
//! diagnostics for editor tooling.
//!
//! ## Key Properties
//!
//! - **Strings by default**: a bare scalar is a string unless a hint says
//!   otherwise; `enabled: true` is the string `"true"` until you write
//!   `enabled(bool): true`
//! - **Order preserved**: maps keep document key order
//! - **One walk, two outputs**: the tree builder and token emitter consume
//!   one shared event stream, so they can never disagree about structure
//! - **Editor-grade positions**: token columns are UTF-16 code units, emoji
//!   included
//!
//! ## Quick Start
//!
//! ```rust
//! use zolo::{loads, Format, Value};
//!
//! let doc = loads(
//!     "server:\n    host: localhost\n    port(int): 8080",
//!     Format::Zolo,
//! )
//! .unwrap();
//!
//! let server = doc.get("server").unwrap();
//! assert_eq!(server.get("host").unwrap().as_str(), Some("localhost"));
//! assert_eq!(server.get("port").unwrap().as_f64(), Some(8080.0));
//! ```
//!
//! ### Tokenizing for an editor
//!
//! ```rust
//! use zolo::{tokenize, DocumentKind};
//!
//! let result = tokenize("title: Hello\n# a comment", DocumentKind::Data);
//! assert!(result.errors.is_empty());
//! assert!(result.data.is_some());
//! assert!(!result.tokens.is_empty());
//! ```
//!
//! `tokenize` never fails: on an invalid document it returns `data = None`
//! with the error message in `errors`, plus whatever tokens it could produce,
//! so highlighting keeps working while the user types.
//!
//! ### Building values in code
//!
//! ```rust
//! use zolo::zolo;
//!
//! let value = zolo!({ "name": "Alice", "tags": ["a", "b"] });
//! assert_eq!(value.get("name").unwrap().as_str(), Some("Alice"));
//! ```

pub mod coerce;
mod comment;
pub mod dialect;
pub mod error;
mod event;
mod indent;
pub mod macros;
pub mod map;
mod record;
pub mod spec;
pub mod token;
mod tree;
pub mod value;

pub use coerce::TypeHint;
pub use dialect::{Dialect, DocumentKind};
pub use error::{Error, Result};
pub use map::ZoloMap;
pub use token::{Diagnostic, ParseResult, Range, SemanticToken, Severity, TokenType};
pub use value::Value;

use serde::Serialize;
use std::path::Path;

/// The grammars `loads`/`load` understand.
///
/// Only [`Format::Zolo`] uses the engine in this crate; YAML and JSON defer
/// to their standard library parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Zolo,
    Yaml,
    Json,
}

impl Format {
    /// Picks a format from a path's extension, if it names one.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "zolo" => Some(Format::Zolo),
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

/// A configured parser.
///
/// The free functions below cover the common case; construct a `Parser` when
/// a non-default [`Dialect`] is needed. A parser holds no mutable state, so
/// one instance can serve concurrent calls from multiple threads.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    dialect: Dialect,
}

impl Parser {
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Parser { dialect }
    }

    /// Parses text into a value tree.
    ///
    /// # Errors
    ///
    /// Returns the first fatal parse error: mixed indentation, a missing
    /// colon, a duplicate sibling key, a failed hint conversion, or a raw
    /// non-ASCII character. There is no partial result on failure.
    pub fn loads(&self, text: &str, format: Format) -> Result<Value> {
        match format {
            Format::Zolo => parse_zolo(text),
            Format::Yaml => serde_yaml::from_str(text).map_err(Error::custom),
            Format::Json => serde_json::from_str(text).map_err(Error::custom),
        }
    }

    /// Reads and parses a file, inferring the format from the extension when
    /// none is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for a missing path, [`Error::Io`] for any
    /// other read failure, and the same parse errors as [`Parser::loads`].
    pub fn load(&self, path: impl AsRef<Path>, format: Option<Format>) -> Result<Value> {
        let path = path.as_ref();
        let format = format
            .or_else(|| Format::from_path(path))
            .unwrap_or_default();
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound(path.display().to_string()),
            _ => Error::Io(e.to_string()),
        })?;
        self.loads(&text, format)
    }

    /// Produces tokens, diagnostics, and (when the document is valid) the
    /// data tree. Never fails; see [`ParseResult`].
    #[must_use]
    pub fn tokenize(&self, text: &str, kind: DocumentKind) -> ParseResult {
        let raw: Vec<&str> = text.lines().collect();
        let mut result = ParseResult::default();

        if let Err(e) = indent::audit(&raw) {
            result.errors.push(e.to_string());
            return result;
        }

        let pre = comment::preprocess(&raw);
        let (records, split_errors) = record::split_records_lenient(&pre, &raw);
        let events = event::walk(&records, &pre.comments);
        let (tokens, diagnostics) = token::emit(&events, &raw, kind, &self.dialect);
        result.tokens = tokens;
        result.diagnostics = diagnostics;

        if split_errors.is_empty() {
            match tree::build(&events) {
                Ok(data) => result.data = Some(data),
                Err(e) => result.errors.push(e.to_string()),
            }
        } else {
            result.errors.extend(split_errors);
        }

        result
    }
}

fn parse_zolo(text: &str) -> Result<Value> {
    let raw: Vec<&str> = text.lines().collect();
    indent::audit(&raw)?;
    let pre = comment::preprocess(&raw);
    let records = record::split_records(&pre, &raw)?;
    tree::build(&event::walk(&records, &pre.comments))
}

/// Parses text into a value tree with the default dialect.
///
/// # Errors
///
/// See [`Parser::loads`].
pub fn loads(text: &str, format: Format) -> Result<Value> {
    Parser::default().loads(text, format)
}

/// Reads and parses a file with the default dialect.
///
/// # Errors
///
/// See [`Parser::load`].
pub fn load(path: impl AsRef<Path>, format: Option<Format>) -> Result<Value> {
    Parser::default().load(path, format)
}

/// Tokenizes text with the default dialect. Never fails.
#[must_use]
pub fn tokenize(text: &str, kind: DocumentKind) -> ParseResult {
    Parser::default().tokenize(text, kind)
}

/// Serializes any `T: Serialize` to text.
///
/// Dumping is lossy: type hints, comments, and the original layout
/// do not survive, and `Format::Zolo` emits the YAML shape (which the parser
/// does not read back as zolo).
///
/// # Errors
///
/// Returns [`Error::Dump`] when the value cannot be serialized.
pub fn dumps<T>(value: &T, format: Format) -> Result<String>
where
    T: ?Sized + Serialize,
{
    match format {
        Format::Zolo | Format::Yaml => serde_yaml::to_string(value).map_err(Error::dump),
        Format::Json => serde_json::to_string_pretty(value).map_err(Error::dump),
    }
}

/// Serializes a value and writes it to a file.
///
/// # Errors
///
/// Returns [`Error::Dump`] on serialization failure and [`Error::Io`] on a
/// write failure.
pub fn dump<T>(value: &T, path: impl AsRef<Path>, format: Format) -> Result<()>
where
    T: ?Sized + Serialize,
{
    let text = dumps(value, format)?;
    std::fs::write(path, text).map_err(|e| Error::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_basic() {
        let doc = loads("a: 1\nb: [1, 2]", Format::Zolo).unwrap();
        assert_eq!(doc.get("a").unwrap().as_str(), Some("1"));
        assert_eq!(doc.get("b").unwrap().as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_loads_propagates_first_error() {
        assert!(loads("a: 1\na: 2", Format::Zolo).is_err());
    }

    #[test]
    fn test_loads_json() {
        let doc = loads(r#"{"a": true, "b": [1, 2]}"#, Format::Json).unwrap();
        assert_eq!(doc.get("a").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn test_loads_yaml() {
        let doc = loads("a: 1\nb:\n  - x\n  - y", Format::Yaml).unwrap();
        assert_eq!(doc.get("a").unwrap().as_f64(), Some(1.0));
        assert_eq!(doc.get("b").unwrap().as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_format_from_path() {
        use std::path::Path;
        assert_eq!(Format::from_path(Path::new("a.zolo")), Some(Format::Zolo));
        assert_eq!(Format::from_path(Path::new("a.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("a.txt")), None);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("definitely/not/here.zolo", None).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_tokenize_degrades_on_duplicate_key() {
        let result = tokenize("a: 1\na: 2", DocumentKind::Data);
        assert!(result.data.is_none());
        assert_eq!(result.errors.len(), 1);
        assert!(!result.tokens.is_empty());
    }

    #[test]
    fn test_dumps_json() {
        let value = crate::zolo!({"a": 1});
        let json = dumps(&value, Format::Json).unwrap();
        assert!(json.contains("\"a\""));
    }
}
