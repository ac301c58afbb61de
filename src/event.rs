//! The single structural walk shared by the tree builder and token emitter.
//!
//! Both output modes used to be easy to drift apart when each walked the
//! lines itself. Instead, this module turns the record sequence plus the
//! comment spans into one flat [`ParseEvent`] stream, and the tree builder
//! and token emitter are two independent consumers of that stream. What
//! counts as a comment, a container, or a leaf is decided exactly once.
//!
//! A record is a container exactly when the next record is indented strictly
//! deeper; everything else is a leaf. `Exit` events close containers so that
//! the stream is properly nested.

use crate::comment::CommentSpan;
use crate::record::LineRecord;

/// One step of the structural walk.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent<'a> {
    /// A comment span on one physical line.
    Comment(&'a CommentSpan),
    /// A key that owns a nested block; children follow until the matching
    /// [`ParseEvent::Exit`].
    Enter(&'a LineRecord),
    /// A key with a scalar (or multiline) value.
    Leaf(&'a LineRecord),
    /// Closes the most recent open container.
    Exit,
}

/// Produces the event stream for one document.
///
/// Comments are interleaved in line order with the records; container nesting
/// follows indentation. The stream is deterministic for a fixed input.
pub fn walk<'a>(records: &'a [LineRecord], comments: &'a [CommentSpan]) -> Vec<ParseEvent<'a>> {
    let mut events = Vec::with_capacity(records.len() * 2 + comments.len());
    let mut comments = comments.iter().peekable();
    let mut open: Vec<usize> = Vec::new();

    for (i, record) in records.iter().enumerate() {
        while let Some(comment) = comments.next_if(|c| c.line <= record.source_line) {
            events.push(ParseEvent::Comment(comment));
        }

        while let Some(&depth) = open.last() {
            if record.indent <= depth {
                events.push(ParseEvent::Exit);
                open.pop();
            } else {
                break;
            }
        }

        let has_children = records
            .get(i + 1)
            .is_some_and(|next| next.indent > record.indent);
        if has_children {
            events.push(ParseEvent::Enter(record));
            open.push(record.indent);
        } else {
            events.push(ParseEvent::Leaf(record));
        }
    }

    for comment in comments {
        events.push(ParseEvent::Comment(comment));
    }
    for _ in open {
        events.push(ParseEvent::Exit);
    }

    events
}
