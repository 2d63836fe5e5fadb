//! A mapping with a synchronized attribute-style view.
//!
//! Every entry is reachable under its original key and under a derived
//! attribute name ([`attr_name_for_key`]). Both views are thin adapters over
//! one backing store, so a write through either is immediately visible
//! through the other.

use std::collections::btree_map;
use std::collections::{BTreeMap, HashMap};
use std::ops::Index;

use crate::attr::attr_name_for_key;
use crate::error::AccessError;
use crate::value::Value;

/// A string-keyed mapping whose entries are also addressable by attribute
/// name.
///
/// Values are converted on the way in: plain maps become [`AttrMap`]s and
/// plain sequences become [`AttrList`](crate::AttrList)s, recursively, so
/// attribute access reaches arbitrarily deep.
///
/// ```
/// use attrmap::AttrMap;
///
/// let mut map = AttrMap::new();
/// map.set("retry-count", 3);
///
/// assert_eq!(map["retry-count"], 3);                  // key view
/// assert_eq!(*map.attr("retry_count").unwrap(), 3);   // attribute view
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttrMap {
    /// The single backing store both views resolve into.
    entries: BTreeMap<String, Value>,
    /// Attribute name -> original key. Exactly one entry per key.
    attrs: BTreeMap<String, String>,
}

impl AttrMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map by merging `sources` left to right.
    ///
    /// Later sources win ties for non-map values; map values on both sides of
    /// a tie are merged recursively and accumulate keys from all sources.
    pub fn merged<I>(sources: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AttrMap>,
    {
        let mut map = AttrMap::new();
        for source in sources {
            map.merge(source);
        }
        map
    }

    /// Sets `key` and returns the map, for chained construction.
    ///
    /// Applied after [`merged`](AttrMap::merged), this gives explicit entries
    /// precedence over every positional source.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry, from both views.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.attrs.clear();
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn contains_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Returns the value at `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Like [`get`](AttrMap::get), but reports the missing key as an error.
    pub fn try_get(&self, key: &str) -> Result<&Value, AccessError> {
        self.entries.get(key).ok_or_else(|| AccessError::KeyNotFound {
            key: key.to_owned(),
        })
    }

    /// Stores `value` at `key`, converting it on the way in.
    ///
    /// The key's attribute alias is registered at the same time. When the
    /// alias is already taken by a different key, numeric suffixes `_1`,
    /// `_2`, … are tried until a free one is found, and a warning is logged.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        self.register_attr(&key);
        self.entries.insert(key, value.into());
    }

    /// Removes `key` from both views.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let value = self.entries.remove(key)?;
        self.attrs.retain(|_, k| k != key);
        Some(value)
    }

    /// Like [`remove`](AttrMap::remove), but reports the missing key.
    pub fn try_remove(&mut self, key: &str) -> Result<Value, AccessError> {
        self.remove(key).ok_or_else(|| AccessError::KeyNotFound {
            key: key.to_owned(),
        })
    }

    /// Returns the value behind attribute `name`.
    ///
    /// Fails with [`AccessError::AttrNotFound`] when no key maps to `name`;
    /// the failure is distinct from a missing key so both views keep their
    /// own reporting conventions.
    pub fn attr(&self, name: &str) -> Result<&Value, AccessError> {
        let key = self.attrs.get(name).ok_or_else(|| AccessError::AttrNotFound {
            name: name.to_owned(),
        })?;
        self.entries.get(key).ok_or_else(|| AccessError::AttrNotFound {
            name: name.to_owned(),
        })
    }

    pub fn attr_mut(&mut self, name: &str) -> Result<&mut Value, AccessError> {
        let key = self.attrs.get(name).ok_or_else(|| AccessError::AttrNotFound {
            name: name.to_owned(),
        })?;
        self.entries
            .get_mut(key)
            .ok_or_else(|| AccessError::AttrNotFound {
                name: name.to_owned(),
            })
    }

    /// Stores `value` behind attribute `name`.
    ///
    /// When `name` is an existing alias, the aliased key's slot is updated;
    /// otherwise `name` itself becomes the key.
    pub fn set_attr(&mut self, name: &str, value: impl Into<Value>) {
        let key = self
            .attrs
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_owned());
        self.set(key, value);
    }

    /// Removes the entry behind attribute `name`, from both views.
    pub fn remove_attr(&mut self, name: &str) -> Result<Value, AccessError> {
        let key = self.attrs.remove(name).ok_or_else(|| AccessError::AttrNotFound {
            name: name.to_owned(),
        })?;
        // Drop any other alias still pointing at the key, so the index
        // never outlives the entry.
        self.attrs.retain(|_, k| k != &key);
        self.entries
            .remove(&key)
            .ok_or_else(|| AccessError::AttrNotFound {
                name: name.to_owned(),
            })
    }

    /// Merges `source` into this map.
    ///
    /// For each key of `source`: when both the existing and the incoming
    /// value are maps, they are merged recursively; any other combination is
    /// overwritten by the incoming value. Keys present on only one side are
    /// kept as-is.
    pub fn merge(&mut self, source: impl Into<AttrMap>) {
        let source: AttrMap = source.into();
        for (key, incoming) in source.entries {
            let overwrite = match (self.entries.get_mut(&key), incoming) {
                (Some(Value::Map(existing)), Value::Map(incoming)) => {
                    existing.merge(incoming);
                    None
                }
                (_, incoming) => Some(incoming),
            };
            if let Some(value) = overwrite {
                self.set(key, value);
            }
        }
    }

    /// Merges a [`Value`] that must be a map.
    ///
    /// Fails with [`AccessError::NotAMap`] otherwise; nothing is changed in
    /// that case.
    pub fn merge_value(&mut self, value: Value) -> Result<(), AccessError> {
        match value {
            Value::Map(map) => {
                self.merge(map);
                Ok(())
            }
            other => Err(AccessError::NotAMap { kind: other.kind() }),
        }
    }

    /// Iterates over `(key, value)` entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> btree_map::Values<'_, String, Value> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> btree_map::ValuesMut<'_, String, Value> {
        self.entries.values_mut()
    }

    /// Registers the attribute alias for `key`, suffixing on collision.
    ///
    /// A key that already owns an alias keeps it; re-setting a key never
    /// grows the index.
    fn register_attr(&mut self, key: &str) {
        if self.attrs.values().any(|k| k == key) {
            return;
        }
        let base = attr_name_for_key(key);
        if !self.attrs.contains_key(&base) {
            self.attrs.insert(base, key.to_owned());
            return;
        }

        // The base alias belongs to a different key; take the first free
        // numbered slot.
        let mut i = 1usize;
        let name = loop {
            let candidate = format!("{base}_{i}");
            if !self.attrs.contains_key(&candidate) {
                break candidate;
            }
            i += 1;
        };
        log::warn!(
            "mapped key {key:?} to attribute {name:?}: attribute {base:?} is already taken by key {taken:?}",
            taken = self.attrs[&base],
        );
        self.attrs.insert(name, key.to_owned());
    }
}

impl PartialEq for AttrMap {
    fn eq(&self, other: &Self) -> bool {
        // Structural: the attribute index is derived state and never
        // participates in equality.
        self.entries == other.entries
    }
}

impl PartialEq<BTreeMap<String, Value>> for AttrMap {
    fn eq(&self, other: &BTreeMap<String, Value>) -> bool {
        self.entries == *other
    }
}

impl PartialEq<AttrMap> for BTreeMap<String, Value> {
    fn eq(&self, other: &AttrMap) -> bool {
        other == self
    }
}

impl Index<&str> for AttrMap {
    type Output = Value;

    /// Panics when `key` is absent, like the standard map types.
    fn index(&self, key: &str) -> &Value {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no entry found for key {key:?}"),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AttrMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AttrMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for AttrMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for AttrMap {
    fn from(source: BTreeMap<String, V>) -> Self {
        source.into_iter().collect()
    }
}

impl<V: Into<Value>> From<HashMap<String, V>> for AttrMap {
    fn from(source: HashMap<String, V>) -> Self {
        source.into_iter().collect()
    }
}

impl IntoIterator for AttrMap {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttrMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
