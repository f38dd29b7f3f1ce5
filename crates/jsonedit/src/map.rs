//! Insertion-ordered JSON object storage.
//!
//! Objects keep their entries in the order they were first inserted.
//! Replacing an existing key keeps its slot, so a document read, edited and
//! re-serialized lists its keys exactly as the host wrote them.

use indexmap::IndexMap;

use crate::Value;

/// An ordered, duplicate-free mapping from string keys to [`Value`]s.
///
/// Equality is order sensitive: `{"a":1,"b":2}` and `{"b":2,"a":1}` are
/// different maps.
#[derive(Clone, Debug, Default)]
pub struct Map {
    entries: IndexMap<String, Value>,
}

impl Map {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty map with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Mutable access to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Inserts `value` under `key`.
    ///
    /// An existing entry is replaced in place and its previous value
    /// returned; a new key is appended after every existing entry.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.entries.insert(key, value)
    }

    /// Removes `key`, shifting later entries up by one.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Values in key order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(&str, Value); N]> for Map {
    fn from(entries: [(&str, Value); N]) -> Self {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect()
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(map: &Map) -> Vec<&str> {
        map.keys().collect()
    }

    #[test]
    fn insert_appends_new_keys() {
        let mut map = Map::new();
        assert_eq!(map.insert("b".into(), Value::Integer(1)), None);
        assert_eq!(map.insert("a".into(), Value::Integer(2)), None);
        assert_eq!(keys(&map), ["b", "a"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut map = Map::from([
            ("a", Value::Integer(1)),
            ("b", Value::Integer(2)),
            ("c", Value::Integer(3)),
        ]);
        let old = map.insert("b".into(), Value::Boolean(true));
        assert_eq!(old, Some(Value::Integer(2)));
        assert_eq!(keys(&map), ["a", "b", "c"]);
        assert_eq!(map.get("b"), Some(&Value::Boolean(true)));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn remove_preserves_remaining_order() {
        let mut map = Map::from([
            ("a", Value::Integer(1)),
            ("b", Value::Integer(2)),
            ("c", Value::Integer(3)),
        ]);
        assert_eq!(map.remove("a"), Some(Value::Integer(1)));
        assert_eq!(map.remove("a"), None);
        assert_eq!(keys(&map), ["b", "c"]);
    }

    #[test]
    fn collecting_duplicates_keeps_first_position_last_value() {
        let map: Map = [
            ("k".to_owned(), Value::Integer(1)),
            ("j".to_owned(), Value::Integer(2)),
            ("k".to_owned(), Value::Integer(3)),
        ]
        .into_iter()
        .collect();
        assert_eq!(keys(&map), ["k", "j"]);
        assert_eq!(map.get("k"), Some(&Value::Integer(3)));
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab = Map::from([("a", Value::Null), ("b", Value::Null)]);
        let ba = Map::from([("b", Value::Null), ("a", Value::Null)]);
        assert_ne!(ab, ba);
    }

    #[test]
    fn wide_objects_keep_order_through_edits() {
        let mut map: Map = (0..50_000)
            .map(|i| (format!("k{i}"), Value::Integer(i)))
            .collect();
        assert_eq!(map.len(), 50_000);
        assert_eq!(map.insert("k25000".into(), Value::Null), Some(Value::Integer(25_000)));
        assert_eq!(map.remove("k0"), Some(Value::Integer(0)));
        let keys = keys(&map);
        assert_eq!(keys[..2], ["k1", "k2"]);
        assert_eq!(keys[24_999], "k25000");
        assert_eq!(keys.last(), Some(&"k49999"));
    }
}
