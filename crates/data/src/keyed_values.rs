use indexmap::IndexMap;

use crate::error::{DataError, KeyKind};
use crate::values::{DataKey, KeyedValues, Values};

/// An ordered list of `(key, optional value)` pairs.
///
/// Keys keep their insertion order. Re-putting an existing key replaces
/// its value in place.
#[derive(Debug, Clone)]
pub struct DefaultKeyedValues<K, V> {
    data: IndexMap<K, Option<V>>,
}

impl<K: DataKey, V: Copy + Into<f64>> Default for DefaultKeyedValues<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: DataKey, V: Copy + Into<f64>> DefaultKeyedValues<K, V> {
    pub fn new() -> Self {
        Self {
            data: IndexMap::new(),
        }
    }

    /// Set the value for `key`, appending the key if it is new.
    /// Returns the key's index.
    pub fn put(&mut self, key: K, value: Option<V>) -> usize {
        self.data.insert_full(key, value).0
    }

    /// Remove `key`, shifting later keys down by one. Returns the index
    /// the key had.
    pub fn remove(&mut self, key: &K) -> Result<usize, DataError> {
        self.data
            .shift_remove_full(key)
            .map(|(index, _, _)| index)
            .ok_or_else(|| DataError::unknown(KeyKind::Item, key))
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, Option<V>)> {
        self.data.iter().map(|(k, v)| (k, *v))
    }
}

impl<K: DataKey, V: Copy + Into<f64>> Values for DefaultKeyedValues<K, V> {
    type Item = V;

    fn item_count(&self) -> usize {
        self.data.len()
    }

    fn value(&self, index: usize) -> Option<V> {
        match self.data.get_index(index) {
            Some((_, v)) => *v,
            None => panic!("item index {index} out of range ({})", self.data.len()),
        }
    }
}

impl<K: DataKey, V: Copy + Into<f64>> KeyedValues for DefaultKeyedValues<K, V> {
    type Key = K;

    fn key(&self, index: usize) -> Option<K> {
        self.data.get_index(index).map(|(k, _)| k.clone())
    }

    fn index(&self, key: &K) -> Option<usize> {
        self.data.get_index_of(key)
    }

    fn keys(&self) -> Vec<K> {
        self.data.keys().cloned().collect()
    }

    fn value_by_key(&self, key: &K) -> Result<Option<V>, DataError> {
        self.data
            .get(key)
            .copied()
            .ok_or_else(|| DataError::unknown(KeyKind::Item, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_keeps_insertion_order() {
        let mut v = DefaultKeyedValues::<String, f64>::new();
        assert_eq!(v.put("b".into(), Some(2.0)), 0);
        assert_eq!(v.put("a".into(), Some(1.0)), 1);
        assert_eq!(v.put("b".into(), Some(5.0)), 0);
        assert_eq!(v.keys(), vec!["b".to_string(), "a".to_string()]);
        assert_eq!(v.value(0), Some(5.0));
        assert_eq!(v.item_count(), 2);
    }

    #[test]
    fn test_empty_slot_is_nan() {
        let mut v = DefaultKeyedValues::<&str, f64>::new();
        v.put("x", None);
        assert_eq!(v.value(0), None);
        assert!(v.double_value(0).is_nan());
        assert_eq!(v.value_by_key(&"x"), Ok(None));
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let mut v = DefaultKeyedValues::<&str, f64>::new();
        v.put("x", Some(1.0));
        assert!(matches!(
            v.value_by_key(&"y"),
            Err(DataError::UnknownKey { kind: KeyKind::Item, .. })
        ));
        assert!(v.remove(&"y").is_err());
        assert_eq!(v.index(&"y"), None);
        assert_eq!(v.key(3), None);
    }

    #[test]
    fn test_remove_shifts_later_keys() {
        let mut v = DefaultKeyedValues::<&str, f64>::new();
        v.put("a", Some(1.0));
        v.put("b", Some(2.0));
        v.put("c", Some(3.0));
        assert_eq!(v.remove(&"a"), Ok(0));
        assert_eq!(v.index(&"c"), Some(1));
        assert_eq!(v.value(0), Some(2.0));
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        let v = DefaultKeyedValues::<&str, f64>::new();
        v.value(0);
    }
}
