//! Indentation audit pass.
//!
//! A zolo document commits to one indentation character family: the first
//! indented line decides between tabs and spaces, and every later indented
//! line must follow suit. The audit runs once over the raw lines before any
//! other processing; it does no depth reasoning, only character policing.

use crate::error::{Error, IndentKind, Result};

/// Scans every non-empty line and enforces a single indentation family.
///
/// Returns the family the document settled on, or `None` for documents with
/// no indented lines at all. A line mixing both characters, or using the
/// family the document did not establish, is a fatal error naming the line.
pub fn audit(lines: &[&str]) -> Result<Option<IndentKind>> {
    let mut established: Option<IndentKind> = None;

    for (number, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let mut saw_tab = false;
        let mut saw_space = false;
        for ch in line.chars() {
            match ch {
                '\t' => saw_tab = true,
                ' ' => saw_space = true,
                _ => break,
            }
        }

        let used = match (saw_tab, saw_space) {
            (false, false) => continue,
            (true, true) => {
                let expected = established.unwrap_or(IndentKind::Spaces);
                return Err(Error::mixed_indentation(number, expected));
            }
            (true, false) => IndentKind::Tabs,
            (false, true) => IndentKind::Spaces,
        };

        match established {
            None => established = Some(used),
            Some(expected) if expected != used => {
                return Err(Error::mixed_indentation(number, expected));
            }
            Some(_) => {}
        }
    }

    Ok(established)
}
