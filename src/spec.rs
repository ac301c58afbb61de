//! The zolo format, as implemented by this crate.
//!
//! This module carries no code; it documents the grammar and the coercion
//! rules the parser applies.
//!
//! # Overview
//!
//! A zolo document is a sequence of `key: value` lines. Nesting follows
//! indentation; a key whose following lines are indented deeper owns them as
//! a nested map:
//!
//! ```text
//! server:
//!     host: localhost
//!     port(int): 8080
//! ```
//!
//! Indentation must be all-spaces or all-tabs for the whole document; the
//! first indented line decides which, and mixing is a parse error.
//!
//! # Keys and type hints
//!
//! A parenthesized suffix on a key selects explicit coercion:
//!
//! | Hint | Effect |
//! |------|--------|
//! | `int` | parse as integer (stored as a float) |
//! | `float` | parse as float |
//! | `bool` | `true/yes/1/on` or `false/no/0/off`, case-insensitive |
//! | `str` | string; with a nested block, collects it as multiline text |
//! | `raw` | string with escape processing suppressed |
//! | `null` | null, whatever the text says |
//! | `list` / `dict` | assert the flow-container shape |
//! | `date` / `time` / `url` / `path` | semantic tags, string pass-through |
//!
//! Only that closed vocabulary counts: `size(px): 12` is a key literally
//! named `size(px)`. Sibling keys must be unique after hint stripping, so
//! `port(int):` and `port:` collide.
//!
//! # Values
//!
//! Without a hint, a value is detected in this order:
//!
//! 1. **zPath**: `@.a.b` or `~.a.b`, kept as an opaque reference string.
//! 2. **Flow list**: `[a, b, c]`; elements split on top-level commas only,
//!    so `[1, [2, 3], 4]` nests.
//! 3. **Flow object**: `{x: 10, y: 20}`; duplicate keys inside are the same
//!    fatal error as duplicate block keys.
//! 4. **Number**: inside a flow container only, text matching the JSON
//!    number grammar (no leading zeros) becomes a float. A bare scalar after
//!    a colon is never a number: `port: 8080` is the string `"8080"`.
//! 5. **`null`**: the literal, in either position.
//! 6. **String**: everything else.
//!
//! Booleans are never auto-detected; `enabled: true` is the string `"true"`.
//!
//! ## Strings and escapes
//!
//! String text must be ASCII. A raw character outside that range is a parse
//! error whose message contains the exact `\uXXXX` escape (or surrogate
//! pair) to paste instead:
//!
//! ```text
//! motto: café            # error, the message suggests \u00E9
//! motto: caf\u00E9       # ok, parses as "café"
//! ```
//!
//! The known escapes `\n \t \r \\ \" \'` decode; any other backslash
//! sequence is literal text, so Windows paths and regex fragments survive
//! unquoted. `(raw)` skips all of this.
//!
//! ## Multiline text
//!
//! A `(str)` key with no inline value collects every following
//! deeper-indented line verbatim, blank lines included. The first collected
//! line's indentation is the base and is stripped, so only relative
//! indentation survives:
//!
//! ```text
//! body(str):
//!     Dear user,
//!
//!       indented second paragraph
//! ```
//!
//! parses as `"Dear user,\n\n  indented second paragraph"`. Only `(str)`
//! opens a block; `|` and triple quotes are ordinary characters.
//!
//! # Comments
//!
//! `#` as the first non-whitespace character makes the whole line a comment,
//! at any indentation. `#> ... <#` is a paired comment that may span lines;
//! matching is first-match and non-nesting, an unmatched `#>` is literal
//! text, and text after a closer continues the interrupted line.
//!
//! # Tokens and diagnostics
//!
//! [`tokenize`](crate::tokenize) runs the same structural walk and emits one
//! classified token per lexical element, with UTF-16 columns. In
//! [`DocumentKind::Ui`](crate::DocumentKind) documents, keys from the UI
//! vocabulary (elements, access blocks and their options, image options,
//! plural shorthands) get their own categories, and a UI key at the document
//! root yields a warning diagnostic. Data parsing is never affected: the same
//! document loads identically in either kind.
//!
//! Tokenizing never fails. An invalid document yields `data = None`, the
//! error text in `errors`, and whatever tokens were still derivable.
