//! Semantic tokens and diagnostics for editor tooling.
//!
//! The token emitter consumes the same event stream as the tree builder and
//! produces a flat, position-exact classification of every lexical element:
//! comments, keys (with UI-aware subclasses), type hints, punctuation, and
//! value atoms. Alongside the tokens it collects non-fatal [`Diagnostic`]s,
//! such as UI keys placed at the document root or trailing whitespace.
//!
//! Record spans arrive in preprocessed columns, where inline comments have
//! been excised; the emitter maps each span back to the physical columns the
//! kept text came from before anything else, so tokens stay position-exact
//! on lines with inline comments. Positions are then converted from char
//! units to UTF-16 code units per physical line, because characters outside
//! the Basic Multilingual Plane occupy two UTF-16 units. Editors count in
//! UTF-16; skipping the conversion corrupts cursor placement on any line
//! containing an emoji.
//!
//! Token output is sorted by `(line, start)` and is deterministic for a fixed
//! input.

use crate::coerce::TypeHint;
use crate::comment::Segment;
use crate::dialect::{Dialect, DocumentKind};
use crate::event::ParseEvent;
use crate::record::LineRecord;
use crate::value::Value;

/// The lexical classification of one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Comment,
    RootKey,
    NestedKey,
    ElementKey,
    AccessKey,
    AccessOption,
    ImageOption,
    ShorthandKey,
    ShorthandOption,
    TypeHint,
    Colon,
    Comma,
    Bracket,
    Brace,
    StringBracket,
    StringBrace,
    Number,
    Bool,
    Null,
    ZPath,
    Escape,
    String,
    Timestamp,
    TimeValue,
    Version,
    Ratio,
}

impl TokenType {
    /// Returns the wire name used by editor-protocol consumers.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenType::Comment => "comment",
            TokenType::RootKey => "rootKey",
            TokenType::NestedKey => "nestedKey",
            TokenType::ElementKey => "elementKey",
            TokenType::AccessKey => "accessKey",
            TokenType::AccessOption => "accessOption",
            TokenType::ImageOption => "imageOption",
            TokenType::ShorthandKey => "shorthandKey",
            TokenType::ShorthandOption => "shorthandOption",
            TokenType::TypeHint => "typeHint",
            TokenType::Colon => "colon",
            TokenType::Comma => "comma",
            TokenType::Bracket => "bracket",
            TokenType::Brace => "brace",
            TokenType::StringBracket => "stringBracket",
            TokenType::StringBrace => "stringBrace",
            TokenType::Number => "number",
            TokenType::Bool => "bool",
            TokenType::Null => "null",
            TokenType::ZPath => "zpath",
            TokenType::Escape => "escape",
            TokenType::String => "string",
            TokenType::Timestamp => "timestamp",
            TokenType::TimeValue => "time",
            TokenType::Version => "version",
            TokenType::Ratio => "ratio",
        }
    }
}

/// One classified span. `start`/`end` are UTF-16 code-unit columns on `line`;
/// tokens never cross a line boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticToken {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub token_type: TokenType,
    pub modifiers: Vec<&'static str>,
}

/// A source range in UTF-16 columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

/// Diagnostic severity, ordered like the editor protocol: 1 is an error,
/// 4 a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error = 1,
    Warning = 2,
    Information = 3,
    Hint = 4,
}

/// A non-fatal notice attached to a source range. Diagnostics are collected,
/// never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub range: Range,
    pub message: String,
    pub severity: Severity,
    pub source: &'static str,
}

/// Everything `tokenize` produces for one document.
///
/// `data` is `None` whenever a fatal parse error occurred; the error text is
/// then in `errors`, and `tokens`/`diagnostics` still hold whatever was
/// produced, so editor tooling keeps working on an invalid document.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub data: Option<Value>,
    pub tokens: Vec<SemanticToken>,
    pub errors: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

const DIAGNOSTIC_SOURCE: &str = "zolo";

/// What kind of container each open block is, for child-key classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Access,
    Image,
    Shorthand,
    Plain,
}

/// Emits tokens and diagnostics for one event stream.
pub(crate) fn emit(
    events: &[ParseEvent<'_>],
    raw: &[&str],
    kind: DocumentKind,
    dialect: &Dialect,
) -> (Vec<SemanticToken>, Vec<Diagnostic>) {
    let mut emitter = Emitter {
        dialect,
        kind,
        raw,
        tokens: Vec::new(),
        diagnostics: Vec::new(),
        blocks: Vec::new(),
        segments: Vec::new(),
    };

    for event in events {
        match event {
            ParseEvent::Comment(span) => {
                emitter.push_raw(span.line, span.start, span.end, TokenType::Comment, vec![]);
            }
            ParseEvent::Enter(record) => {
                emitter.emit_record(record);
                emitter.blocks.push(emitter.block_kind(record));
            }
            ParseEvent::Leaf(record) => emitter.emit_record(record),
            ParseEvent::Exit => {
                emitter.blocks.pop();
            }
        }
    }

    emitter.whitespace_diagnostics();
    emitter.tokens.sort_by_key(|t| (t.line, t.start));
    (emitter.tokens, emitter.diagnostics)
}

struct Emitter<'a> {
    dialect: &'a Dialect,
    kind: DocumentKind,
    raw: &'a [&'a str],
    tokens: Vec<SemanticToken>,
    diagnostics: Vec<Diagnostic>,
    blocks: Vec<BlockKind>,
    /// Column map of the record currently being emitted.
    segments: Vec<Segment>,
}

impl Emitter<'_> {
    /// Records a token given in preprocessed columns of the current record's
    /// line, mapping it back to the physical spans the kept text came from.
    /// A span interrupted by an inline comment produces one token per piece.
    fn push(&mut self, start: usize, end: usize, token_type: TokenType, modifiers: Vec<&'static str>) {
        for (line, s, e) in self.mapped(start, end) {
            self.push_raw(line, s, e, token_type, modifiers.clone());
        }
    }

    /// Records a token already in physical coordinates, converting char
    /// columns to UTF-16 on the way in.
    fn push_raw(
        &mut self,
        line: usize,
        start: usize,
        end: usize,
        token_type: TokenType,
        modifiers: Vec<&'static str>,
    ) {
        let text = self.raw.get(line).copied().unwrap_or("");
        self.tokens.push(SemanticToken {
            line,
            start: utf16_col(text, start),
            end: utf16_col(text, end),
            token_type,
            modifiers,
        });
    }

    /// Intersects `[start, end)` in preprocessed columns with the current
    /// segment map, yielding `(line, start, end)` physical char spans.
    fn mapped(&self, start: usize, end: usize) -> Vec<(usize, usize, usize)> {
        let mut pieces = Vec::new();
        for seg in &self.segments {
            let s = start.max(seg.pre_start);
            let e = end.min(seg.pre_start + seg.len);
            if s < e {
                pieces.push((seg.line, seg.col + s - seg.pre_start, seg.col + e - seg.pre_start));
            }
        }
        pieces
    }

    fn block_kind(&self, record: &LineRecord) -> BlockKind {
        if self.kind != DocumentKind::Ui {
            return BlockKind::Plain;
        }
        if self.dialect.is_access_key(&record.key) {
            BlockKind::Access
        } else if self.dialect.is_image_key(&record.key) {
            BlockKind::Image
        } else if self.dialect.is_shorthand(&record.key) {
            BlockKind::Shorthand
        } else {
            BlockKind::Plain
        }
    }

    fn emit_record(&mut self, record: &LineRecord) {
        self.segments = record.segments.clone();
        let token_type = self.classify_key(record);
        self.push(record.key_span.0, record.key_span.1, token_type, vec![]);
        if let Some((start, end)) = record.hint_span {
            self.push(start, end, TokenType::TypeHint, vec![]);
        }
        self.push(record.colon_col, record.colon_col + 1, TokenType::Colon, vec![]);

        if record.is_multiline {
            for &(line, start, end) in &record.block_spans {
                if start < end {
                    self.push_raw(line, start, end, TokenType::String, vec!["multiline"]);
                }
            }
        } else if let Some((start, _)) = record.value_span {
            self.emit_value(start, &record.value, record.hint);
        }
    }

    /// Classifies a key and raises root-placement diagnostics for UI keys.
    ///
    /// A UI element, access, or shorthand key at the document root is legal
    /// data but almost certainly a mistake in a UI file, so it surfaces as a
    /// warning diagnostic rather than a parse error.
    fn classify_key(&mut self, record: &LineRecord) -> TokenType {
        let at_root = self.blocks.is_empty();

        if self.kind == DocumentKind::Ui {
            match self.blocks.last() {
                Some(BlockKind::Access) if self.dialect.is_access_option(&record.key) => {
                    return TokenType::AccessOption;
                }
                Some(BlockKind::Image) if self.dialect.is_image_option(&record.key) => {
                    return TokenType::ImageOption;
                }
                Some(BlockKind::Shorthand) => return TokenType::ShorthandOption,
                _ => {}
            }

            let classified = if self.dialect.is_element(&record.key) {
                Some(("element", TokenType::ElementKey))
            } else if self.dialect.is_access_key(&record.key) {
                Some(("access", TokenType::AccessKey))
            } else if self.dialect.is_shorthand(&record.key) {
                Some(("shorthand", TokenType::ShorthandKey))
            } else {
                None
            };
            if let Some((label, token_type)) = classified {
                if at_root {
                    self.root_placement_diagnostic(record, label);
                }
                return token_type;
            }
        }

        if at_root {
            TokenType::RootKey
        } else {
            TokenType::NestedKey
        }
    }

    fn root_placement_diagnostic(&mut self, record: &LineRecord, label: &str) {
        let Some(&(line, start, end)) = self.mapped(record.key_span.0, record.key_span.1).first()
        else {
            return;
        };
        let text = self.raw.get(line).copied().unwrap_or("");
        self.diagnostics.push(Diagnostic {
            range: Range {
                start_line: line,
                start_col: utf16_col(text, start),
                end_line: line,
                end_col: utf16_col(text, end),
            },
            message: format!(
                "{} key '{}' at document root; expected inside a container",
                label, record.key
            ),
            severity: Severity::Warning,
            source: DIAGNOSTIC_SOURCE,
        });
    }

    /// Tokenizes one inline value.
    fn emit_value(&mut self, start: usize, text: &str, hint: Option<TypeHint>) {
        let end = start + text.chars().count();

        match hint {
            Some(TypeHint::Bool) => {
                self.push(start, end, TokenType::Bool, vec![]);
                return;
            }
            Some(TypeHint::Int | TypeHint::Float) => {
                self.push(start, end, TokenType::Number, vec![]);
                return;
            }
            Some(TypeHint::Null) => {
                self.push(start, end, TokenType::Null, vec![]);
                return;
            }
            // A string-hinted value is never a flow container; its brackets
            // are string text. A raw value has no escapes either.
            Some(TypeHint::Str) => {
                self.lex_string(start, text, true);
                return;
            }
            Some(TypeHint::Raw) => {
                self.lex_string(start, text, false);
                return;
            }
            Some(TypeHint::Date | TypeHint::Time | TypeHint::Url | TypeHint::Path) => {
                self.lex_atom(start, text);
                return;
            }
            _ => {}
        }

        if crate::coerce::is_zpath_text(text) {
            self.push(start, end, TokenType::ZPath, vec![]);
        } else if text.starts_with(['[', '{']) {
            self.lex_flow(start, text);
        } else {
            self.lex_atom(start, text);
        }
    }

    /// Tokenizes the inside of a flow container: structural punctuation plus
    /// classified atoms between it.
    fn lex_flow(&mut self, start: usize, text: &str) {
        let mut atom_start: Option<usize> = None;
        for (offset, ch) in text.chars().enumerate() {
            let structural = match ch {
                '[' | ']' => Some(TokenType::Bracket),
                '{' | '}' => Some(TokenType::Brace),
                ',' => Some(TokenType::Comma),
                ':' => Some(TokenType::Colon),
                _ => None,
            };
            match structural {
                Some(token_type) => {
                    if let Some(from) = atom_start.take() {
                        self.flow_atom(start, text, from, offset);
                    }
                    self.push(start + offset, start + offset + 1, token_type, vec![]);
                }
                None => {
                    if atom_start.is_none() && !ch.is_whitespace() {
                        atom_start = Some(offset);
                    }
                }
            }
        }
        if let Some(from) = atom_start {
            self.flow_atom(start, text, from, text.chars().count());
        }
    }

    /// Classifies one comma-separated atom inside a flow container.
    fn flow_atom(&mut self, start: usize, text: &str, from: usize, to: usize) {
        let chars: Vec<char> = text.chars().collect();
        let mut to = to;
        while to > from && chars[to - 1].is_whitespace() {
            to -= 1;
        }
        if to == from {
            return;
        }
        let atom: String = chars[from..to].iter().collect();
        let token_type = if crate::coerce::is_number_text(&atom) {
            TokenType::Number
        } else if atom == "null" {
            TokenType::Null
        } else if atom == "true" || atom == "false" {
            TokenType::Bool
        } else if crate::coerce::is_zpath_text(&atom) {
            TokenType::ZPath
        } else {
            self.lex_string(start + from, &atom, true);
            return;
        };
        self.push(start + from, start + to, token_type, vec![]);
    }

    /// Tokenizes a plain scalar: number and null literals, the pattern-matched
    /// string subtypes, or string text with escapes and embedded punctuation.
    fn lex_atom(&mut self, start: usize, text: &str) {
        let end = start + text.chars().count();
        if crate::coerce::is_number_text(text) {
            self.push(start, end, TokenType::Number, vec![]);
        } else if text == "null" {
            self.push(start, end, TokenType::Null, vec![]);
        } else if let Some(token_type) = string_pattern(text) {
            self.push(start, end, token_type, vec![]);
        } else {
            self.lex_string(start, text, true);
        }
    }

    /// Splits string text into plain segments, escape sequences, and
    /// re-tagged brackets/braces.
    ///
    /// Brackets inside a string get their own token subtypes so editor
    /// bracket-matchers leave them alone. Only the known escape set is
    /// marked; unknown backslash sequences stay inside the string segment,
    /// and `mark_escapes` is off for raw values, where a backslash is just a
    /// character.
    fn lex_string(&mut self, start: usize, text: &str, mark_escapes: bool) {
        let chars: Vec<char> = text.chars().collect();
        let mut segment_start = 0usize;
        let mut i = 0usize;

        while i < chars.len() {
            let special = match chars[i] {
                '[' | ']' => Some((TokenType::StringBracket, 1)),
                '{' | '}' => Some((TokenType::StringBrace, 1)),
                '\\' if mark_escapes => escape_len(&chars, i).map(|len| (TokenType::Escape, len)),
                _ => None,
            };
            match special {
                Some((token_type, len)) => {
                    self.string_segment(start, &chars, segment_start, i);
                    self.push(start + i, start + i + len, token_type, vec![]);
                    i += len;
                    segment_start = i;
                }
                None => i += 1,
            }
        }
        self.string_segment(start, &chars, segment_start, chars.len());
    }

    fn string_segment(&mut self, start: usize, chars: &[char], from: usize, to: usize) {
        if from < to && chars[from..to].iter().any(|c| !c.is_whitespace()) {
            self.push(start + from, start + to, TokenType::String, vec![]);
        }
    }

    /// Trailing whitespace on a content line is worth a notice, not an error.
    fn whitespace_diagnostics(&mut self) {
        for (number, line) in self.raw.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let trimmed_len = line.trim_end().chars().count();
            let full_len = line.chars().count();
            if trimmed_len < full_len {
                self.diagnostics.push(Diagnostic {
                    range: Range {
                        start_line: number,
                        start_col: utf16_col(line, trimmed_len),
                        end_line: number,
                        end_col: utf16_col(line, full_len),
                    },
                    message: "trailing whitespace".to_string(),
                    severity: Severity::Information,
                    source: DIAGNOSTIC_SOURCE,
                });
            }
        }
    }
}

/// Length in chars of a known escape sequence starting at `chars[at]`,
/// or `None` when the backslash starts an unknown sequence.
fn escape_len(chars: &[char], at: usize) -> Option<usize> {
    match chars.get(at + 1)? {
        'n' | 't' | 'r' | '\\' | '"' | '\'' => Some(2),
        'u' => {
            let all_hex = (0..4).all(|o| {
                chars
                    .get(at + 2 + o)
                    .is_some_and(|c| c.is_ascii_hexdigit())
            });
            all_hex.then_some(6)
        }
        _ => None,
    }
}

/// Pattern-matched string subtypes, purely for highlighting.
fn string_pattern(text: &str) -> Option<TokenType> {
    if is_timestamp(text) {
        Some(TokenType::Timestamp)
    } else if is_time(text) {
        Some(TokenType::TimeValue)
    } else if is_version(text) {
        Some(TokenType::Version)
    } else if is_ratio(text) {
        Some(TokenType::Ratio)
    } else {
        None
    }
}

fn digits(text: &str, count: usize) -> Option<&str> {
    let taken = text.chars().take_while(char::is_ascii_digit).count();
    (taken == count).then(|| &text[count..])
}

/// `YYYY-MM-DD`, optionally followed by `T` or a space and a time.
fn is_timestamp(text: &str) -> bool {
    let Some(rest) = digits(text, 4).and_then(|r| r.strip_prefix('-')) else {
        return false;
    };
    let Some(rest) = digits(rest, 2).and_then(|r| r.strip_prefix('-')) else {
        return false;
    };
    let Some(rest) = digits(rest, 2) else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }
    rest.strip_prefix(['T', ' ']).is_some_and(is_time)
}

/// `H:MM` or `HH:MM`, optionally `:SS`.
fn is_time(text: &str) -> bool {
    let hours = text.chars().take_while(char::is_ascii_digit).count();
    if !(1..=2).contains(&hours) {
        return false;
    }
    let Some(rest) = text[hours..].strip_prefix(':') else {
        return false;
    };
    let Some(rest) = digits(rest, 2) else {
        return false;
    };
    rest.is_empty() || digits(rest.strip_prefix(':').unwrap_or("x"), 2) == Some("")
}

/// `v1.2`, `1.2.3` and longer dotted runs. Two bare components like `1.2`
/// are already a number and never reach this check.
fn is_version(text: &str) -> bool {
    let body = text.strip_prefix('v').unwrap_or(text);
    let parts: Vec<&str> = body.split('.').collect();
    parts.len() >= 2
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// `16:9`-style ratios.
fn is_ratio(text: &str) -> bool {
    match text.split_once(':') {
        Some((a, b)) => {
            !a.is_empty()
                && !b.is_empty()
                && a.chars().all(|c| c.is_ascii_digit())
                && b.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Converts a char column into a UTF-16 code-unit column on one line.
fn utf16_col(line: &str, char_col: usize) -> usize {
    line.chars().take(char_col).map(char::len_utf16).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::preprocess;
    use crate::event::walk;
    use crate::record::split_records_lenient;

    fn run(text: &str, kind: DocumentKind) -> (Vec<SemanticToken>, Vec<Diagnostic>) {
        let raw: Vec<&str> = text.lines().collect();
        let pre = preprocess(&raw);
        let (records, _) = split_records_lenient(&pre, &raw);
        let events = walk(&records, &pre.comments);
        emit(&events, &raw, kind, &Dialect::default())
    }

    fn types(tokens: &[SemanticToken]) -> Vec<TokenType> {
        tokens.iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn test_basic_line_tokens() {
        let (tokens, _) = run("port(int): 8080", DocumentKind::Data);
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::RootKey,
                TokenType::TypeHint,
                TokenType::Colon,
                TokenType::Number
            ]
        );
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, 4);
        assert_eq!(tokens[1].start, 4);
        assert_eq!(tokens[1].end, 9);
    }

    #[test]
    fn test_root_vs_nested_keys() {
        let (tokens, _) = run("a:\n    b: 1", DocumentKind::Data);
        assert_eq!(tokens[0].token_type, TokenType::RootKey);
        assert_eq!(tokens[2].token_type, TokenType::NestedKey);
    }

    #[test]
    fn test_flow_list_tokens() {
        let (tokens, _) = run("a: [1, x]", DocumentKind::Data);
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::RootKey,
                TokenType::Colon,
                TokenType::Bracket,
                TokenType::Number,
                TokenType::Comma,
                TokenType::String,
                TokenType::Bracket
            ]
        );
    }

    #[test]
    fn test_flow_object_tokens() {
        let (tokens, _) = run("p: {x: 10}", DocumentKind::Data);
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::RootKey,
                TokenType::Colon,
                TokenType::Brace,
                TokenType::String,
                TokenType::Colon,
                TokenType::Number,
                TokenType::Brace
            ]
        );
    }

    #[test]
    fn test_string_brackets_retagged() {
        let (tokens, _) = run("note: see [docs] here", DocumentKind::Data);
        let brackets: Vec<_> = tokens
            .iter()
            .filter(|t| t.token_type == TokenType::StringBracket)
            .collect();
        assert_eq!(brackets.len(), 2);
        assert!(!types(&tokens).contains(&TokenType::Bracket));
    }

    #[test]
    fn test_escape_tokens() {
        let (tokens, _) = run(r"msg: a\nb\qc", DocumentKind::Data);
        let escapes: Vec<_> = tokens
            .iter()
            .filter(|t| t.token_type == TokenType::Escape)
            .collect();
        // \n is marked, unknown \q is not
        assert_eq!(escapes.len(), 1);
        assert_eq!(escapes[0].start, 6);
        assert_eq!(escapes[0].end, 8);
    }

    #[test]
    fn test_comment_tokens() {
        let (tokens, _) = run("# header\na: 1", DocumentKind::Data);
        assert_eq!(tokens[0].token_type, TokenType::Comment);
        assert_eq!(tokens[0].line, 0);
        assert_eq!(tokens[0].end, 8);
    }

    #[test]
    fn test_multiline_comment_one_token_per_line() {
        let (tokens, _) = run("#> one\ntwo <#\na: 1", DocumentKind::Data);
        let comments: Vec<_> = tokens
            .iter()
            .filter(|t| t.token_type == TokenType::Comment)
            .collect();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].line, 0);
        assert_eq!(comments[1].line, 1);
    }

    #[test]
    fn test_ui_key_classification() {
        let doc = "dialog:\n    button:\n        access:\n            read: yes";
        let (tokens, _) = run(doc, DocumentKind::Ui);
        let keys: Vec<_> = tokens
            .iter()
            .filter(|t| t.token_type != TokenType::Colon && t.token_type != TokenType::String)
            .map(|t| t.token_type)
            .collect();
        assert_eq!(
            keys,
            vec![
                TokenType::ElementKey,
                TokenType::ElementKey,
                TokenType::AccessKey,
                TokenType::AccessOption
            ]
        );
    }

    #[test]
    fn test_data_mode_ignores_ui_vocabulary() {
        let (tokens, diagnostics) = run("button:\n    label: Ok", DocumentKind::Data);
        assert_eq!(tokens[0].token_type, TokenType::RootKey);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_shorthand_keys() {
        let doc = "dialog:\n    buttons:\n        save: Save";
        let (tokens, _) = run(doc, DocumentKind::Ui);
        let shorthand: Vec<_> = tokens
            .iter()
            .filter(|t| {
                matches!(
                    t.token_type,
                    TokenType::ShorthandKey | TokenType::ShorthandOption
                )
            })
            .collect();
        assert_eq!(shorthand.len(), 2);
    }

    #[test]
    fn test_root_placement_diagnostic_not_error() {
        let (tokens, diagnostics) = run("button: Ok", DocumentKind::Ui);
        assert!(!tokens.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].message.contains("button"));
    }

    #[test]
    fn test_trailing_whitespace_diagnostic() {
        let (_, diagnostics) = run("a: 1   \nb: 2", DocumentKind::Data);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Information);
        assert_eq!(diagnostics[0].range.start_col, 4);
    }

    #[test]
    fn test_utf16_columns_after_emoji() {
        // the emoji is one char but two UTF-16 units
        let (tokens, _) = run("# 😀 note\na: 1", DocumentKind::Data);
        assert_eq!(tokens[0].token_type, TokenType::Comment);
        // "# 😀 note" is 8 chars, 9 UTF-16 units
        assert_eq!(tokens[0].end, 9);
    }

    #[test]
    fn test_zpath_token() {
        let (tokens, _) = run("user: @.users.alice", DocumentKind::Data);
        assert_eq!(tokens[2].token_type, TokenType::ZPath);
    }

    #[test]
    fn test_pattern_subtypes() {
        let cases = [
            ("when: 2024-01-15", TokenType::Timestamp),
            ("when: 2024-01-15 09:30:00", TokenType::Timestamp),
            ("at: 09:30", TokenType::TimeValue),
            ("rel: v1.2.3", TokenType::Version),
            ("rel: 1.2.3", TokenType::Version),
            ("aspect: 16:9", TokenType::Ratio),
        ];
        for (doc, expected) in cases {
            let (tokens, _) = run(doc, DocumentKind::Data);
            assert_eq!(tokens[2].token_type, expected, "for {doc}");
        }
    }

    #[test]
    fn test_bool_and_null_tokens() {
        let (tokens, _) = run("a(bool): yes\nb: null", DocumentKind::Data);
        assert_eq!(tokens[3].token_type, TokenType::Bool);
        assert_eq!(tokens[6].token_type, TokenType::Null);
    }

    #[test]
    fn test_multiline_block_string_tokens() {
        let (tokens, _) = run("text(str):\n    alpha\n    beta", DocumentKind::Data);
        let strings: Vec<_> = tokens
            .iter()
            .filter(|t| t.token_type == TokenType::String)
            .collect();
        assert_eq!(strings.len(), 2);
        assert!(strings[0].modifiers.contains(&"multiline"));
    }

    #[test]
    fn test_inline_comment_before_key_splits_positions() {
        let (tokens, _) = run("a#> x <#b: 1", DocumentKind::Data);
        let keys: Vec<_> = tokens
            .iter()
            .filter(|t| t.token_type == TokenType::RootKey)
            .map(|t| (t.start, t.end))
            .collect();
        // the key "ab" is two kept pieces around the comment
        assert_eq!(keys, vec![(0, 1), (8, 9)]);
        let comment = tokens
            .iter()
            .find(|t| t.token_type == TokenType::Comment)
            .unwrap();
        assert_eq!((comment.start, comment.end), (1, 8));
    }

    #[test]
    fn test_inline_comment_before_value_keeps_value_position() {
        let (tokens, _) = run("k#> comment <#: 1", DocumentKind::Data);
        let colon = tokens
            .iter()
            .find(|t| t.token_type == TokenType::Colon)
            .unwrap();
        assert_eq!((colon.start, colon.end), (14, 15));
        let value = tokens
            .iter()
            .find(|t| t.token_type == TokenType::Number)
            .unwrap();
        assert_eq!((value.start, value.end), (16, 17));
    }

    #[test]
    fn test_value_spliced_across_closer_tokens_on_both_lines() {
        let (tokens, _) = run("key: val#> aside\nstill comment <#ue", DocumentKind::Data);
        let strings: Vec<_> = tokens
            .iter()
            .filter(|t| t.token_type == TokenType::String)
            .map(|t| (t.line, t.start, t.end))
            .collect();
        assert_eq!(strings, vec![(0, 5, 8), (1, 16, 18)]);
    }

    #[test]
    fn test_raw_hint_brackets_are_string_text() {
        let (tokens, _) = run("pattern(raw): [a-z]", DocumentKind::Data);
        assert!(!types(&tokens).contains(&TokenType::Bracket));
        let brackets = tokens
            .iter()
            .filter(|t| t.token_type == TokenType::StringBracket)
            .count();
        assert_eq!(brackets, 2);
    }

    #[test]
    fn test_raw_hint_backslash_is_not_escape() {
        let (tokens, _) = run(r"pattern(raw): a\nb", DocumentKind::Data);
        assert!(!types(&tokens).contains(&TokenType::Escape));
    }

    #[test]
    fn test_str_hint_braces_are_string_text() {
        let (tokens, _) = run("tpl(str): {name}", DocumentKind::Data);
        assert!(types(&tokens).contains(&TokenType::StringBrace));
        assert!(!types(&tokens).contains(&TokenType::Brace));
    }

    #[test]
    fn test_output_sorted_and_deterministic() {
        let doc = "a: [1, 2]\n# note\nb:\n    c: x";
        let (first, _) = run(doc, DocumentKind::Data);
        let (second, _) = run(doc, DocumentKind::Data);
        assert_eq!(first, second);
        let positions: Vec<_> = first.iter().map(|t| (t.line, t.start)).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }
}
