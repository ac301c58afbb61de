//! Classification vocabulary for the token emitter.
//!
//! Key classification (which keys count as UI elements, access blocks, image
//! options, and so on) is configuration data, not behavior: it lives in an
//! immutable [`Dialect`] handed to [`Parser`](crate::Parser) construction, so
//! stricter or looser dialects can coexist in one process without touching
//! global state.
//!
//! The document kind is likewise explicit. Callers that only have a filename
//! can derive a kind with [`DocumentKind::from_filename`], but the tokenizer
//! itself never sniffs filenames.
//!
//! ## Examples
//!
//! ```rust
//! use zolo::{Dialect, DocumentKind, Parser};
//!
//! let parser = Parser::new(Dialect::default());
//! let result = parser.tokenize("button:\n    label: Ok", DocumentKind::Ui);
//! assert!(result.errors.is_empty());
//!
//! assert_eq!(DocumentKind::from_filename("ui.main.zolo"), DocumentKind::Ui);
//! assert_eq!(DocumentKind::from_filename("config.zolo"), DocumentKind::Data);
//! ```

/// What kind of document the tokenizer is looking at.
///
/// The kind only affects token classification and root-placement diagnostics;
/// it never changes the parsed data tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentKind {
    /// Plain configuration data; every key is a root or nested key.
    #[default]
    Data,
    /// A UI definition file; element, access, image, and shorthand keys get
    /// their own token categories.
    Ui,
}

impl DocumentKind {
    /// Derives a kind from a filename, for callers that have nothing better.
    ///
    /// A file whose base name starts with any of the stock UI prefixes
    /// (`ui.`, `ui-`, `ui_`) is a UI document; everything else is data.
    #[must_use]
    pub fn from_filename(name: &str) -> Self {
        let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
        if ["ui.", "ui-", "ui_"].iter().any(|p| base.starts_with(p)) {
            DocumentKind::Ui
        } else {
            DocumentKind::Data
        }
    }
}

/// Immutable classification vocabulary injected into parser construction.
///
/// The defaults describe the stock zolo UI vocabulary; a consumer with its own
/// element set builds a custom `Dialect` and passes it to
/// [`Parser::new`](crate::Parser::new).
#[derive(Debug, Clone)]
pub struct Dialect {
    /// Keys that open an access-control block (`access:` ...).
    pub access_keys: Vec<String>,
    /// Option keys recognized inside an access-control block.
    pub access_options: Vec<String>,
    /// Keys that open an image block.
    pub image_keys: Vec<String>,
    /// Option keys recognized inside an image block.
    pub image_options: Vec<String>,
    /// UI element names; the plural form (`buttons`) is the shorthand
    /// container for a run of elements of that type.
    pub elements: Vec<String>,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect {
            access_keys: to_owned(&["access", "rights"]),
            access_options: to_owned(&["read", "write", "create", "delete", "visible"]),
            image_keys: to_owned(&["image", "icon", "preview"]),
            image_options: to_owned(&["source", "fit", "ratio", "cover", "back"]),
            elements: to_owned(&[
                "button", "field", "label", "table", "column", "menu", "dialog", "tab",
                "section", "info",
            ]),
        }
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

impl Dialect {
    /// Returns `true` if `key` opens an access-control block.
    #[must_use]
    pub fn is_access_key(&self, key: &str) -> bool {
        self.access_keys.iter().any(|k| k == key)
    }

    /// Returns `true` if `key` is an option inside an access-control block.
    #[must_use]
    pub fn is_access_option(&self, key: &str) -> bool {
        self.access_options.iter().any(|k| k == key)
    }

    /// Returns `true` if `key` opens an image block.
    #[must_use]
    pub fn is_image_key(&self, key: &str) -> bool {
        self.image_keys.iter().any(|k| k == key)
    }

    /// Returns `true` if `key` is an option inside an image block.
    #[must_use]
    pub fn is_image_option(&self, key: &str) -> bool {
        self.image_options.iter().any(|k| k == key)
    }

    /// Returns `true` if `key` names a UI element.
    #[must_use]
    pub fn is_element(&self, key: &str) -> bool {
        self.elements.iter().any(|k| k == key)
    }

    /// Returns `true` if `key` is the plural shorthand for an element type
    /// (`buttons` for `button`).
    #[must_use]
    pub fn is_shorthand(&self, key: &str) -> bool {
        key.strip_suffix('s')
            .is_some_and(|singular| self.is_element(singular))
    }
}
