//! Ordered tag store filled by a single decode call.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Ordered mapping of format-native tag keys to values.
///
/// Keys keep the order in which they were first seen. Writing an existing key
/// appends to the stored value instead of replacing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagStore {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`, comma-joining onto an existing value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl AsRef<str>) {
        self.insert_joined(key, value, ",");
    }

    /// Insert `value` under `key`, joining onto an existing value with `sep`.
    pub fn insert_joined(&mut self, key: impl Into<String>, value: impl AsRef<str>, sep: &str) {
        let key = key.into();
        let value = value.as_ref();
        match self.index.get(&key) {
            Some(&idx) => {
                let existing = &mut self.entries[idx].1;
                existing.push_str(sep);
                existing.push_str(value);
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value.to_string()));
            }
        }
    }

    /// Overwrite the value of an existing key. Returns false if absent.
    pub fn replace(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.index.get(key) {
            Some(&idx) => {
                self.entries[idx].1 = value.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&idx| self.entries[idx].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for TagStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
