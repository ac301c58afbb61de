//! Error types for zolo parsing and serialization.
//!
//! This module provides comprehensive error reporting with contextual information
//! to help diagnose and fix zolo documents.
//!
//! ## Error Categories
//!
//! - **Structural errors**: mixed indentation, duplicate keys, missing colons
//! - **Coercion errors**: an explicit type hint the value cannot satisfy
//! - **Encoding errors**: raw non-ASCII characters, with a ready-to-paste escape
//! - **I/O and dump errors**: file reading/writing and serialization failures
//!
//! All structural and coercion errors carry the offending 1-based line number;
//! duplicate-key errors carry both lines involved.
//!
//! ## Examples
//!
//! ```rust
//! use zolo::{loads, Format};
//!
//! let err = loads("a: 1\na: 2", Format::Zolo).unwrap_err();
//! assert!(err.to_string().contains("line 1"));
//! assert!(err.to_string().contains("line 2"));
//! ```

use thiserror::Error;

/// The indentation character family a document is committed to.
///
/// The first indented line of a document establishes the family; every later
/// indented line must use the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentKind {
    Tabs,
    Spaces,
}

impl IndentKind {
    /// Returns the human-readable name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IndentKind::Tabs => "tabs",
            IndentKind::Spaces => "spaces",
        }
    }
}

impl std::fmt::Display for IndentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents all possible errors that can occur while parsing or dumping zolo.
///
/// Each variant includes the context needed to point the user at the offending
/// source line.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The file passed to `load` does not exist
    #[error("file not found: {0}")]
    NotFound(String),

    /// A line indents with the opposite character family than the document established
    #[error("mixed indentation at line {line}: document is indented with {expected}")]
    MixedIndentation { line: usize, expected: IndentKind },

    /// Two sibling keys collide after stripping type-hint suffixes
    #[error("duplicate key '{key}' at line {second} (first defined at line {first})")]
    DuplicateKey {
        key: String,
        first: usize,
        second: usize,
    },

    /// An explicit type hint could not be satisfied by the value text
    #[error("cannot convert '{value}' to {hint} at line {line}")]
    HintMismatch {
        value: String,
        hint: String,
        line: usize,
    },

    /// A raw character outside the ASCII range, with a computed escape replacement
    #[error("non-ASCII character U+{codepoint:04X} at line {line}: replace it with the escape sequence {suggestion}")]
    NonAscii {
        codepoint: u32,
        line: usize,
        suggestion: String,
    },

    /// Generic structural error with line context
    #[error("parse error at line {line}: {msg}")]
    Syntax { line: usize, msg: String },

    /// Serialization failure in `dump`/`dumps`
    #[error("dump error: {0}")]
    Dump(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a structural error tied to a 0-based source line.
    ///
    /// The stored line number is 1-based, matching every user-visible message.
    pub fn syntax(line: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line: line + 1,
            msg: msg.into(),
        }
    }

    /// Creates a mixed-indentation error for a 0-based source line.
    pub fn mixed_indentation(line: usize, expected: IndentKind) -> Self {
        Error::MixedIndentation {
            line: line + 1,
            expected,
        }
    }

    /// Creates a duplicate-key error citing both 0-based source lines.
    pub fn duplicate_key(key: &str, first: usize, second: usize) -> Self {
        Error::DuplicateKey {
            key: key.to_string(),
            first: first + 1,
            second: second + 1,
        }
    }

    /// Creates a failed-hint-conversion error for a 0-based source line.
    pub fn hint_mismatch(value: &str, hint: &str, line: usize) -> Self {
        Error::HintMismatch {
            value: value.to_string(),
            hint: hint.to_string(),
            line: line + 1,
        }
    }

    /// Creates a non-ASCII rejection for `ch` on a 0-based source line.
    ///
    /// The suggestion is the `\uXXXX` escape (or a surrogate pair for
    /// characters above the Basic Multilingual Plane) that, substituted back
    /// into the document, reproduces `ch`.
    pub fn non_ascii(ch: char, line: usize) -> Self {
        Error::NonAscii {
            codepoint: ch as u32,
            line: line + 1,
            suggestion: escape_suggestion(ch),
        }
    }

    /// Creates a dump error with a display message.
    pub fn dump<T: std::fmt::Display>(msg: T) -> Self {
        Error::Dump(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

/// Computes the `\uXXXX` escape string for a character.
///
/// Characters above U+FFFF encode as a UTF-16 surrogate pair, two `\uXXXX`
/// units back to back, which is exactly what the string decoder accepts.
#[must_use]
pub fn escape_suggestion(ch: char) -> String {
    let mut units = [0u16; 2];
    let encoded = ch.encode_utf16(&mut units);
    encoded
        .iter()
        .map(|unit| format!("\\u{unit:04X}"))
        .collect()
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_suggestion_bmp() {
        assert_eq!(escape_suggestion('é'), "\\u00E9");
        assert_eq!(escape_suggestion('日'), "\\u65E5");
    }

    #[test]
    fn test_escape_suggestion_surrogate_pair() {
        // U+1F600 GRINNING FACE needs two UTF-16 units
        assert_eq!(escape_suggestion('😀'), "\\uD83D\\uDE00");
    }

    #[test]
    fn test_duplicate_key_cites_both_lines() {
        let err = Error::duplicate_key("a", 0, 1);
        let msg = err.to_string();
        assert!(msg.contains("line 2"));
        assert!(msg.contains("line 1"));
    }

    #[test]
    fn test_non_ascii_message_contains_suggestion() {
        let err = Error::non_ascii('é', 4);
        let msg = err.to_string();
        assert!(msg.contains("\\u00E9"));
        assert!(msg.contains("line 5"));
    }
}
