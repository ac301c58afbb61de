//! Tree building: the event stream folded into a [`Value`] tree.
//!
//! Containers become ordered maps, leaves go through value coercion, and
//! multiline bodies are taken verbatim. Sibling keys must be unique per
//! level; the comparison uses the hint-stripped key, and a violation is fatal
//! citing both source lines.

use std::collections::HashMap;

use crate::coerce::{coerce, Position};
use crate::error::{Error, Result};
use crate::event::ParseEvent;
use crate::map::ZoloMap;
use crate::record::LineRecord;
use crate::value::Value;

struct Frame {
    map: ZoloMap,
    seen: HashMap<String, usize>,
    key: Option<String>,
}

impl Frame {
    fn root() -> Self {
        Frame {
            map: ZoloMap::new(),
            seen: HashMap::new(),
            key: None,
        }
    }

    fn child(key: String) -> Self {
        Frame {
            map: ZoloMap::new(),
            seen: HashMap::new(),
            key: Some(key),
        }
    }

    /// Registers a sibling key, failing when it was already used at this level.
    fn claim(&mut self, record: &LineRecord) -> Result<()> {
        if let Some(&first) = self.seen.get(&record.key) {
            return Err(Error::duplicate_key(&record.key, first, record.source_line));
        }
        self.seen.insert(record.key.clone(), record.source_line);
        Ok(())
    }
}

/// Folds the event stream into the document's root map.
pub fn build(events: &[ParseEvent<'_>]) -> Result<Value> {
    let mut stack = vec![Frame::root()];

    for event in events {
        match event {
            ParseEvent::Comment(_) => {}
            ParseEvent::Enter(record) => {
                top(&mut stack).claim(record)?;
                stack.push(Frame::child(record.key.clone()));
            }
            ParseEvent::Leaf(record) => {
                let frame = top(&mut stack);
                frame.claim(record)?;
                frame.map.insert(record.key.clone(), leaf_value(record)?);
            }
            ParseEvent::Exit => {
                // The walk guarantees matched Enter/Exit pairs.
                if let Some(done) = stack.pop() {
                    if let Some(key) = done.key {
                        top(&mut stack).map.insert(key, Value::Map(done.map));
                    }
                }
            }
        }
    }

    let root = stack.pop().map(|f| f.map).unwrap_or_default();
    Ok(Value::Map(root))
}

fn top(stack: &mut Vec<Frame>) -> &mut Frame {
    let last = stack.len() - 1;
    &mut stack[last]
}

fn leaf_value(record: &LineRecord) -> Result<Value> {
    if record.is_multiline {
        return Ok(Value::String(record.value.clone()));
    }
    coerce(
        &record.value,
        record.hint,
        Position::Leaf,
        record.source_line,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::preprocess;
    use crate::event::walk;
    use crate::record::split_records;

    fn parse(text: &str) -> Result<Value> {
        let raw: Vec<&str> = text.lines().collect();
        let pre = preprocess(&raw);
        let records = split_records(&pre, &raw)?;
        build(&walk(&records, &pre.comments))
    }

    #[test]
    fn test_flat_map() {
        let doc = parse("host: localhost\nport: 8080").unwrap();
        let map = doc.as_map().unwrap();
        assert_eq!(map.get("host"), Some(&Value::String("localhost".into())));
        assert_eq!(map.get("port"), Some(&Value::String("8080".into())));
    }

    #[test]
    fn test_nested_map() {
        let doc = parse("server:\n    host: localhost\n    port(int): 8080").unwrap();
        let server = doc.get("server").unwrap().as_map().unwrap();
        assert_eq!(server.get("port"), Some(&Value::Number(8080.0)));
    }

    #[test]
    fn test_key_order_preserved() {
        let doc = parse("z: 1\na: 2\nm: 3").unwrap();
        let keys: Vec<_> = doc.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_duplicate_sibling_keys_fatal() {
        let err = parse("a: 1\na: 2").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 1"));
        assert!(msg.contains("line 2"));
    }

    #[test]
    fn test_duplicate_check_uses_stripped_key() {
        let err = parse("port(int): 1\nport: 2").unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { .. }));
    }

    #[test]
    fn test_same_key_at_different_levels_ok() {
        let doc = parse("a:\n    a: 1\nb:\n    a: 2").unwrap();
        assert!(doc.get("a").unwrap().get("a").is_some());
    }

    #[test]
    fn test_duplicate_container_key_fatal() {
        let err = parse("a:\n    x: 1\na:\n    y: 2").unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { .. }));
    }

    #[test]
    fn test_multiline_value_verbatim() {
        let doc = parse("text(str):\n    first\n\n      deep").unwrap();
        assert_eq!(
            doc.get("text"),
            Some(&Value::String("first\n\n  deep".into()))
        );
    }

    #[test]
    fn test_empty_document_is_empty_map() {
        let doc = parse("").unwrap();
        assert!(doc.as_map().unwrap().is_empty());
    }

    #[test]
    fn test_coercion_error_carries_line() {
        let err = parse("a: 1\nb(int): nope").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
