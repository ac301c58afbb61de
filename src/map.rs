//! Ordered map type for zolo objects.
//!
//! This module provides [`ZoloMap`], a wrapper around [`IndexMap`] that maintains
//! insertion order for document keys. Insertion order matters in zolo: the data
//! tree a consumer receives must list keys in the order they appear in the
//! source document.
//!
//! ## Examples
//!
//! ```rust
//! use zolo::{Value, ZoloMap};
//!
//! let mut map = ZoloMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30.0));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to zolo values.
///
/// This is a thin wrapper around [`IndexMap`] that maintains insertion order,
/// matching the key order of the source document.
///
/// # Examples
///
/// ```rust
/// use zolo::{Value, ZoloMap};
///
/// let mut map = ZoloMap::new();
/// map.insert("first".to_string(), Value::from("1"));
/// map.insert("second".to_string(), Value::from("2"));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ZoloMap(IndexMap<String, crate::Value>);

impl ZoloMap {
    /// Creates an empty `ZoloMap`.
    #[must_use]
    pub fn new() -> Self {
        ZoloMap(IndexMap::new())
    }

    /// Creates an empty `ZoloMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ZoloMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned.
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for ZoloMap {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        ZoloMap(map.into_iter().collect())
    }
}

impl From<ZoloMap> for HashMap<String, crate::Value> {
    fn from(map: ZoloMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for ZoloMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ZoloMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for ZoloMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        ZoloMap(IndexMap::from_iter(iter))
    }
}
