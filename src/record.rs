//! Structural splitting of preprocessed lines into [`LineRecord`]s.
//!
//! Each surviving line becomes one record: indentation width, key (with any
//! type-hint suffix recognized and stripped), raw value text, and the char
//! column spans the token emitter needs. A `(str)` hint switches the record
//! into multiline collection, which reads the following raw source lines
//! verbatim.
//!
//! The record sequence is the single structural input for both the tree
//! builder and the token emitter.

use crate::coerce::TypeHint;
use crate::comment::{Preprocessed, Segment, SourceLine};
use crate::error::{Error, Result};

/// One content line, split into its structural parts.
///
/// Columns are char indices into the preprocessed line text; the token
/// emitter converts them to UTF-16 at the edge.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRecord {
    /// Indentation width in chars.
    pub indent: usize,
    /// Key with any recognized type-hint suffix stripped.
    pub key: String,
    /// The recognized hint, if the parenthesized suffix named one.
    pub hint: Option<TypeHint>,
    /// Inline value text, or the collected multiline body.
    pub value: String,
    /// 0-based original source line of the key.
    pub source_line: usize,
    /// True when the value came from `(str)` multiline collection.
    pub is_multiline: bool,
    /// Char span of the stripped key name.
    pub key_span: (usize, usize),
    /// Char span of the hint suffix including parentheses, if present.
    pub hint_span: Option<(usize, usize)>,
    /// Char column of the separating colon.
    pub colon_col: usize,
    /// Char span of the inline value text, if non-empty.
    pub value_span: Option<(usize, usize)>,
    /// For multiline records, one span per collected physical line
    /// (line, start col, end col), after base indentation stripping.
    pub block_spans: Vec<(usize, usize, usize)>,
    /// Mapping from preprocessed columns back to physical source columns,
    /// carried over from the preprocessor.
    pub segments: Vec<Segment>,
}

/// Splits preprocessed lines into records, failing on the first bad line.
pub fn split_records(pre: &Preprocessed, raw: &[&str]) -> Result<Vec<LineRecord>> {
    let (records, mut problems) = split_inner(pre, raw);
    match problems.is_empty() {
        true => Ok(records),
        false => Err(problems.remove(0)),
    }
}

/// Lenient splitting for the tokenizer: bad lines are skipped and reported
/// instead of aborting, so tokens for the rest of the document survive.
pub fn split_records_lenient(pre: &Preprocessed, raw: &[&str]) -> (Vec<LineRecord>, Vec<String>) {
    let (records, problems) = split_inner(pre, raw);
    (records, problems.iter().map(|e| e.to_string()).collect())
}

fn split_inner(pre: &Preprocessed, raw: &[&str]) -> (Vec<LineRecord>, Vec<Error>) {
    let mut records = Vec::with_capacity(pre.lines.len());
    let mut problems: Vec<(usize, Error)> = Vec::new();
    // Lines swallowed by a multiline block are skipped here.
    let mut skip_through = 0usize;

    for line in &pre.lines {
        if line.number < skip_through {
            continue;
        }
        match split_line(line) {
            Err(e) => problems.push((line.number, e)),
            Ok(mut record) => {
                if record.hint == Some(TypeHint::Str) {
                    let had_inline = record.value_span.is_some();
                    if let Some(end) = collect_block(raw, &mut record) {
                        skip_through = end;
                        if had_inline {
                            problems.push((
                                record.source_line,
                                Error::syntax(
                                    record.source_line,
                                    format!(
                                        "key '{}' has both an inline value and a nested block",
                                        record.key
                                    ),
                                ),
                            ));
                            continue;
                        }
                    }
                }
                records.push(record);
            }
        }
    }

    // A scalar record cannot also own a nested block.
    for pair in records.windows(2) {
        let (rec, next) = (&pair[0], &pair[1]);
        if !rec.is_multiline && !rec.value.is_empty() && next.indent > rec.indent {
            problems.push((
                rec.source_line,
                Error::syntax(
                    rec.source_line,
                    format!(
                        "key '{}' has both an inline value and a nested block",
                        rec.key
                    ),
                ),
            ));
        }
    }

    // The block check above runs after the per-line pass; the first error in
    // document order wins either way.
    problems.sort_by_key(|p| p.0);
    (records, problems.into_iter().map(|p| p.1).collect())
}

/// Splits a single line on its first colon and recognizes the hint suffix.
fn split_line(line: &SourceLine) -> Result<LineRecord> {
    let number = line.number;
    let chars: Vec<char> = line.text.chars().collect();
    let indent = chars
        .iter()
        .take_while(|c| **c == ' ' || **c == '\t')
        .count();

    let colon_col = match chars.iter().position(|c| *c == ':') {
        Some(col) => col,
        None => return Err(Error::syntax(number, "missing ':' separator")),
    };

    let mut key_end = colon_col;
    while key_end > indent && chars[key_end - 1].is_whitespace() {
        key_end -= 1;
    }
    if key_end == indent {
        return Err(Error::syntax(number, "missing key before ':'"));
    }

    let raw_key: String = chars[indent..key_end].iter().collect();
    let (key, hint, hint_len) = strip_hint(&raw_key);
    let key_span = (indent, indent + key.chars().count());
    let hint_span = (hint_len > 0).then(|| (key_span.1, key_span.1 + hint_len));

    let mut value_start = colon_col + 1;
    while value_start < chars.len() && chars[value_start].is_whitespace() {
        value_start += 1;
    }
    let mut value_end = chars.len();
    while value_end > value_start && chars[value_end - 1].is_whitespace() {
        value_end -= 1;
    }
    let value: String = chars[value_start..value_end].iter().collect();
    let value_span = (!value.is_empty()).then_some((value_start, value_end));

    Ok(LineRecord {
        indent,
        key,
        hint,
        value,
        source_line: number,
        is_multiline: false,
        key_span,
        hint_span,
        colon_col,
        value_span,
        block_spans: Vec::new(),
        segments: line.segments.clone(),
    })
}

/// Recognizes a `name(hint)` suffix. Only the closed hint vocabulary counts;
/// anything else keeps its parentheses as part of the key.
fn strip_hint(raw_key: &str) -> (String, Option<TypeHint>, usize) {
    if let Some(stripped) = raw_key.strip_suffix(')') {
        if let Some(open) = stripped.rfind('(') {
            let word = &stripped[open + 1..];
            if let Ok(hint) = word.parse::<TypeHint>() {
                let key = raw_key[..open].to_string();
                let hint_len = raw_key[open..].chars().count();
                return (key, Some(hint), hint_len);
            }
        }
    }
    (raw_key.to_string(), None, 0)
}

/// Collects the raw lines of a `(str)` block into `record.value`.
///
/// Every following line indented strictly deeper than the key is read
/// verbatim, blank lines included; trailing blank lines not followed by a
/// deeper line end the block. The first content line's indentation width is
/// the base; at most that many columns are stripped from each line, so any
/// indentation beyond the base survives. Returns the exclusive end line of
/// the block, or `None` when no block followed.
fn collect_block(raw: &[&str], record: &mut LineRecord) -> Option<usize> {
    let mut last_content = None;
    for (offset, line) in raw[record.source_line + 1..].iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let depth = line
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .count();
        if depth <= record.indent {
            break;
        }
        last_content = Some(record.source_line + 1 + offset);
    }
    let last = last_content?;

    let first = record.source_line + 1;
    let base_width = raw[first..=last]
        .iter()
        .find(|l| !l.trim().is_empty())
        .map_or(0, |l| l.chars().take_while(|c| c.is_whitespace()).count());

    let mut body = Vec::with_capacity(last + 1 - first);
    for (number, line) in raw[first..=last].iter().enumerate().map(|(i, l)| (first + i, l)) {
        let stripped = if line.trim().is_empty() {
            ""
        } else {
            let lead = line.chars().take_while(|c| c.is_whitespace()).count();
            let cut = lead.min(base_width);
            let at = line
                .char_indices()
                .nth(cut)
                .map_or(line.len(), |(i, _)| i);
            &line[at..]
        };
        let start = line.chars().count() - stripped.chars().count();
        record
            .block_spans
            .push((number, start, line.chars().count()));
        body.push(stripped);
    }

    record.value = body.join("\n");
    record.is_multiline = true;
    Some(last + 1)
}
