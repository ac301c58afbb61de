//! Line preprocessing: comment stripping and blank-line removal.
//!
//! Two comment forms exist:
//!
//! - a full-line comment: the first non-whitespace character is `#` (but not
//!   the paired opener `#>`); recognized at any indentation;
//! - a paired comment `#> ... <#`, which may span lines. Matching is
//!   first-match and non-nesting, and an opener with no closer anywhere later
//!   in the document is literal text, not a comment. When a closer is
//!   followed on the same line by non-whitespace text, that trailing text is
//!   spliced back onto the logical line the opener interrupted.
//!
//! The preprocessor keeps original line numbers on every surviving line and
//! records one comment span per physical line, so the token emitter can place
//! comment tokens exactly. Excising a comment shifts everything after it, so
//! each surviving line also carries a [`Segment`] map from its preprocessed
//! columns back to the physical columns the kept text came from.

/// A surviving content line, tagged with its original 0-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
    /// Where each kept run of `text` sits in the raw source.
    pub segments: Vec<Segment>,
}

/// One contiguous run of kept chars and its physical origin.
///
/// Chars `[pre_start, pre_start + len)` of the preprocessed line text came
/// from physical line `line` starting at char column `col`. Splicing across
/// a paired-comment closer can put segments of one logical line on different
/// physical lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub pre_start: usize,
    pub len: usize,
    pub line: usize,
    pub col: usize,
}

/// A comment region on one physical line, in char columns.
///
/// Paired comments spanning several lines produce one span per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSpan {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

/// The preprocessor output consumed by the splitter and the token emitter.
#[derive(Debug, Clone, Default)]
pub struct Preprocessed {
    pub lines: Vec<SourceLine>,
    pub comments: Vec<CommentSpan>,
}

const OPENER: &str = "#>";
const CLOSER: &str = "<#";

/// Accumulates one logical line's kept text and its segment map.
#[derive(Debug)]
struct LineBuilder {
    number: usize,
    text: String,
    segments: Vec<Segment>,
}

impl LineBuilder {
    fn new(number: usize) -> Self {
        LineBuilder {
            number,
            text: String::new(),
            segments: Vec::new(),
        }
    }

    fn append(&mut self, line: usize, col: usize, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        let len = chunk.chars().count();
        match self.segments.last_mut() {
            Some(last) if last.line == line && last.col + last.len == col => last.len += len,
            _ => self.segments.push(Segment {
                pre_start: self.text.chars().count(),
                len,
                line,
                col,
            }),
        }
        self.text.push_str(chunk);
    }
}

/// Strips comments and blank lines, preserving indentation and line numbers.
pub fn preprocess(raw: &[&str]) -> Preprocessed {
    let mut out = Preprocessed::default();
    // The logical line a multi-line paired comment interrupted.
    let mut pending: Option<LineBuilder> = None;

    for (number, line) in raw.iter().enumerate() {
        if let Some(builder) = pending.take() {
            match line.find(CLOSER) {
                None => {
                    out.comments.push(CommentSpan {
                        line: number,
                        start: 0,
                        end: line.chars().count(),
                    });
                    pending = Some(builder);
                }
                Some(close) => {
                    let close_end = close + CLOSER.len();
                    let col = line[..close_end].chars().count();
                    out.comments.push(CommentSpan {
                        line: number,
                        start: 0,
                        end: col,
                    });
                    scan_content(raw, number, col, &line[close_end..], builder, &mut out, &mut pending);
                }
            }
            continue;
        }

        let trimmed = line.trim_start();
        if trimmed.starts_with('#') && !trimmed.starts_with(OPENER) {
            let indent = line.chars().count() - trimmed.chars().count();
            out.comments.push(CommentSpan {
                line: number,
                start: indent,
                end: line.chars().count(),
            });
            continue;
        }

        scan_content(raw, number, 0, line, LineBuilder::new(number), &mut out, &mut pending);
    }

    // An unterminated paired comment never happens here: an opener with no
    // closer later in the document is treated as literal text up front.
    if let Some(builder) = pending {
        push_line(&mut out, builder);
    }

    out
}

/// Scans the tail of one physical line for paired comments, emitting spans
/// and either finishing the logical line or parking it as pending when a
/// comment runs past the end of the line.
///
/// `col` is the char column on physical line `line_no` where `text` starts.
fn scan_content(
    raw: &[&str],
    line_no: usize,
    mut col: usize,
    text: &str,
    mut builder: LineBuilder,
    out: &mut Preprocessed,
    pending: &mut Option<LineBuilder>,
) {
    let mut rest = text;

    loop {
        match rest.find(OPENER) {
            None => {
                builder.append(line_no, col, rest);
                break;
            }
            Some(open) => {
                let after = &rest[open + OPENER.len()..];
                if let Some(close) = after.find(CLOSER) {
                    // Same-line pair; splice and keep scanning.
                    let open_col = col + rest[..open].chars().count();
                    let span_chars = rest[open..open + OPENER.len() + close + CLOSER.len()]
                        .chars()
                        .count();
                    out.comments.push(CommentSpan {
                        line: line_no,
                        start: open_col,
                        end: open_col + span_chars,
                    });
                    builder.append(line_no, col, &rest[..open]);
                    col = open_col + span_chars;
                    rest = &after[close + CLOSER.len()..];
                } else if raw[(line_no + 1).min(raw.len())..]
                    .iter()
                    .any(|l| l.contains(CLOSER))
                {
                    // Closer on a later line; comment to end of line, park.
                    let open_col = col + rest[..open].chars().count();
                    out.comments.push(CommentSpan {
                        line: line_no,
                        start: open_col,
                        end: open_col + rest[open..].chars().count(),
                    });
                    builder.append(line_no, col, &rest[..open]);
                    *pending = Some(builder);
                    return;
                } else {
                    // Unmatched opener: literal text.
                    let taken = open + OPENER.len();
                    builder.append(line_no, col, &rest[..taken]);
                    col += rest[..taken].chars().count();
                    rest = &rest[taken..];
                }
            }
        }
    }

    push_line(out, builder);
}

fn push_line(out: &mut Preprocessed, builder: LineBuilder) {
    if !builder.text.trim().is_empty() {
        out.lines.push(SourceLine {
            number: builder.number,
            text: builder.text,
            segments: builder.segments,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Preprocessed {
        let raw: Vec<&str> = text.lines().collect();
        preprocess(&raw)
    }

    fn surviving(pre: &Preprocessed) -> Vec<(usize, &str)> {
        pre.lines
            .iter()
            .map(|l| (l.number, l.text.as_str()))
            .collect()
    }

    #[test]
    fn test_full_line_comment_any_indentation() {
        let pre = run("a: 1\n    # nested comment\nb: 2");
        assert_eq!(surviving(&pre), vec![(0, "a: 1"), (2, "b: 2")]);
        assert_eq!(
            pre.comments,
            vec![CommentSpan {
                line: 1,
                start: 4,
                end: 22
            }]
        );
    }

    #[test]
    fn test_blank_lines_skipped() {
        let pre = run("a: 1\n\n   \nb: 2");
        assert_eq!(surviving(&pre), vec![(0, "a: 1"), (3, "b: 2")]);
    }

    #[test]
    fn test_paired_comment_same_line() {
        let pre = run("a: 1 #> aside <#\nb: 2");
        assert_eq!(surviving(&pre), vec![(0, "a: 1 "), (1, "b: 2")]);
        assert_eq!(pre.comments.len(), 1);
        assert_eq!(pre.comments[0].start, 5);
        assert_eq!(pre.comments[0].end, 16);
    }

    #[test]
    fn test_paired_comment_multi_line() {
        let pre = run("a: 1\n#> long\ncomment\nbody <#\nb: 2");
        assert_eq!(surviving(&pre), vec![(0, "a: 1"), (4, "b: 2")]);
        // one span per physical line of the comment
        let lines: Vec<usize> = pre.comments.iter().map(|c| c.line).collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn test_trailing_text_after_closer_spliced() {
        let pre = run("key: val#> aside\nstill comment <#ue");
        assert_eq!(surviving(&pre), vec![(0, "key: value")]);
    }

    #[test]
    fn test_unmatched_opener_is_literal() {
        let pre = run("a: 1 #> not a comment\nb: 2");
        assert_eq!(
            surviving(&pre),
            vec![(0, "a: 1 #> not a comment"), (1, "b: 2")]
        );
        assert!(pre.comments.is_empty());
        // literal text is one unbroken segment
        assert_eq!(
            pre.lines[0].segments,
            vec![Segment {
                pre_start: 0,
                len: 21,
                line: 0,
                col: 0
            }]
        );
    }

    #[test]
    fn test_full_line_opener_is_not_hash_comment() {
        // `#>` at the start of a line opens a paired comment, not a `#` comment
        let pre = run("#> c <# a: 1");
        assert_eq!(surviving(&pre), vec![(0, " a: 1")]);
        assert_eq!(pre.comments.len(), 1);
    }

    #[test]
    fn test_two_pairs_on_one_line() {
        let pre = run("a#> x <#b#> y <#c: 1");
        assert_eq!(surviving(&pre), vec![(0, "abc: 1")]);
        assert_eq!(pre.comments.len(), 2);
    }

    #[test]
    fn test_segments_map_back_to_source_columns() {
        let pre = run("a#> x <#b: 1");
        assert_eq!(surviving(&pre), vec![(0, "ab: 1")]);
        assert_eq!(
            pre.lines[0].segments,
            vec![
                Segment {
                    pre_start: 0,
                    len: 1,
                    line: 0,
                    col: 0
                },
                Segment {
                    pre_start: 1,
                    len: 4,
                    line: 0,
                    col: 8
                }
            ]
        );
    }

    #[test]
    fn test_spliced_segments_keep_their_physical_lines() {
        let pre = run("key: val#> aside\nstill comment <#ue");
        assert_eq!(
            pre.lines[0].segments,
            vec![
                Segment {
                    pre_start: 0,
                    len: 8,
                    line: 0,
                    col: 0
                },
                Segment {
                    pre_start: 8,
                    len: 2,
                    line: 1,
                    col: 16
                }
            ]
        );
    }
}
