//! Insertion-ordered collection that keeps at most one item per key.
//!
//! This module provides:
//! - [`UniqueKey`] for items that define their own identity
//! - [`KeyStrategy`] with the [`ByValue`] and [`ByKey`] implementations
//! - [`UniqueVec`] and its [`KeyedVec`] alias
//!
//! Fields, imports and constructors are all collected through this type so
//! that generated output keeps a deterministic order.

use crate::error::{CollectionError, Result};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Capability for items that compute their own uniqueness key.
pub trait UniqueKey {
    /// Key type used for deduplication.
    type Key: Eq + Hash + Clone + fmt::Debug;

    /// Returns the key identifying this item.
    fn unique_key(&self) -> Self::Key;
}

/// Strategy extracting the deduplication key from an item.
pub trait KeyStrategy<T> {
    /// Key type produced by the strategy.
    type Key: Eq + Hash + Clone + fmt::Debug;

    /// Computes the key of `item`.
    fn key_of(item: &T) -> Self::Key;
}

/// Uses the item itself as its key.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByValue;

impl<T> KeyStrategy<T> for ByValue
where
    T: Eq + Hash + Clone + fmt::Debug,
{
    type Key = T;

    #[inline]
    fn key_of(item: &T) -> T {
        item.clone()
    }
}

/// Uses the item's [`UniqueKey`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByKey;

impl<T: UniqueKey> KeyStrategy<T> for ByKey {
    type Key = T::Key;

    #[inline]
    fn key_of(item: &T) -> T::Key {
        item.unique_key()
    }
}

/// Handler invoked when an appended item collides with a stored key.
///
/// The stored item is kept either way; an `Err` is returned from
/// [`UniqueVec::append`] unchanged.
pub type DuplicateHandler<K, T> = fn(&K, &T) -> Result<()>;

fn ignore_duplicate<K, T>(_key: &K, _item: &T) -> Result<()> {
    Ok(())
}

fn reject_duplicate<K: fmt::Debug, T: fmt::Debug>(key: &K, item: &T) -> Result<()> {
    Err(CollectionError::duplicate(key, item))
}

/// Ordered collection holding at most one item per key.
pub struct UniqueVec<T, S = ByValue>
where
    S: KeyStrategy<T>,
{
    items: Vec<T>,
    index: HashMap<S::Key, usize>,
    on_duplicate: DuplicateHandler<S::Key, T>,
    _strategy: PhantomData<S>,
}

/// Collection keyed through [`UniqueKey`].
pub type KeyedVec<T> = UniqueVec<T, ByKey>;

impl<T, S: KeyStrategy<T>> UniqueVec<T, S> {
    /// Creates an empty collection that silently drops duplicates.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty collection with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            on_duplicate: ignore_duplicate::<S::Key, T>,
            _strategy: PhantomData,
        }
    }

    /// Replaces the duplicate handler.
    #[must_use]
    pub fn on_duplicate(mut self, handler: DuplicateHandler<S::Key, T>) -> Self {
        self.on_duplicate = handler;
        self
    }

    /// Makes duplicate appends fail with [`CollectionError::DuplicateKey`].
    #[must_use]
    pub fn reject_duplicates(self) -> Self
    where
        T: fmt::Debug,
    {
        self.on_duplicate(reject_duplicate::<S::Key, T>)
    }

    /// Appends `item` unless an item with the same key is stored.
    ///
    /// # Errors
    /// Returns whatever the duplicate handler returns for a colliding key.
    pub fn append(&mut self, item: T) -> Result<&mut Self> {
        let key = S::key_of(&item);

        if self.index.contains_key(&key) {
            (self.on_duplicate)(&key, &item)?;
            return Ok(self);
        }

        self.index.insert(key, self.items.len());
        self.items.push(item);

        Ok(self)
    }

    /// Appends every item of `iter`, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the first error produced by [`Self::append`].
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<()> {
        for item in iter {
            self.append(item)?;
        }
        Ok(())
    }

    /// Returns true if an item sharing `item`'s key is stored.
    #[must_use]
    pub fn has(&self, item: &T) -> bool {
        self.index.contains_key(&S::key_of(item))
    }

    /// Returns true if `key` is stored.
    #[must_use]
    pub fn contains_key(&self, key: &S::Key) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the stored item for `key`.
    #[must_use]
    pub fn get(&self, key: &S::Key) -> Option<&T> {
        self.index.get(key).map(|&idx| &self.items[idx])
    }

    /// Returns the stored item sharing the key computed from `probe`.
    ///
    /// # Errors
    /// Returns [`CollectionError::NotFound`] if no item matches.
    pub fn get_by_key(&self, probe: &T) -> Result<&T> {
        let key = S::key_of(probe);
        self.get(&key).ok_or_else(|| CollectionError::not_found(&key))
    }

    /// Returns the number of stored items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Stable in-place sort. Later appends go after the sorted items.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(compare);
        self.reindex();
    }

    /// Returns the items in order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Iterates the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consumes the collection, returning the ordered items.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (idx, item) in self.items.iter().enumerate() {
            self.index.insert(S::key_of(item), idx);
        }
    }
}

impl<T, S: KeyStrategy<T>> Default for UniqueVec<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, S: KeyStrategy<T>> Clone for UniqueVec<T, S> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            index: self.index.clone(),
            on_duplicate: self.on_duplicate,
            _strategy: PhantomData,
        }
    }
}

impl<T: fmt::Debug, S: KeyStrategy<T>> fmt::Debug for UniqueVec<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<'a, T, S: KeyStrategy<T>> IntoIterator for &'a UniqueVec<T, S> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T, S: KeyStrategy<T>> IntoIterator for UniqueVec<T, S> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        name: String,
        value: u32,
    }

    impl Entry {
        fn new(name: &str, value: u32) -> Self {
            Self {
                name: name.to_string(),
                value,
            }
        }
    }

    impl UniqueKey for Entry {
        type Key = String;

        fn unique_key(&self) -> String {
            self.name.to_lowercase()
        }
    }

    #[test]
    fn test_append_keeps_first_occurrence_order() {
        let mut vec: UniqueVec<&str> = UniqueVec::new();
        for item in ["b", "a", "b", "c", "a", "d"] {
            vec.append(item).expect("ignore policy never fails");
        }

        assert_eq!(vec.len(), 4);
        assert_eq!(vec.items(), &["b", "a", "c", "d"]);
    }

    #[test]
    fn test_append_chaining() {
        let mut vec: UniqueVec<u32> = UniqueVec::with_capacity(4);
        vec.append(1).unwrap().append(2).unwrap().append(1).unwrap();
        assert_eq!(vec.items(), &[1, 2]);
    }

    #[test]
    fn test_reject_duplicates_keeps_contents() {
        let mut vec: KeyedVec<Entry> = KeyedVec::new().reject_duplicates();
        vec.append(Entry::new("Foo", 1)).unwrap();

        let err = vec.append(Entry::new("FOO", 2)).unwrap_err();
        match err {
            CollectionError::DuplicateKey { key, item } => {
                assert_eq!(key, "\"foo\"");
                assert!(item.contains("FOO"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert_eq!(vec.len(), 1);
        assert_eq!(vec.items()[0], Entry::new("Foo", 1));
    }

    #[test]
    fn test_custom_duplicate_handler() {
        fn named(key: &String, _item: &Entry) -> Result<()> {
            Err(CollectionError::NotFound { key: key.clone() })
        }

        let mut vec: KeyedVec<Entry> = KeyedVec::new().on_duplicate(named);
        vec.append(Entry::new("a", 1)).unwrap();
        let err = vec.append(Entry::new("A", 2)).unwrap_err();
        assert_eq!(err, CollectionError::NotFound { key: "a".to_string() });
    }

    #[test]
    fn test_has_uses_key() {
        let mut vec: KeyedVec<Entry> = KeyedVec::new();
        vec.append(Entry::new("Name", 1)).unwrap();

        assert!(vec.has(&Entry::new("name", 99)));
        assert!(!vec.has(&Entry::new("other", 1)));
        assert!(vec.contains_key(&"name".to_string()));
    }

    #[test]
    fn test_get_by_key_round_trip() {
        let mut vec: KeyedVec<Entry> = KeyedVec::new();
        vec.append(Entry::new("Time", 7)).unwrap();

        let probe = Entry::new("time", 0);
        let found = vec.get_by_key(&probe).unwrap();
        assert_eq!(found, &Entry::new("Time", 7));
    }

    #[test]
    fn test_get_by_key_not_found() {
        let vec: KeyedVec<Entry> = KeyedVec::new();
        let err = vec.get_by_key(&Entry::new("Missing", 0)).unwrap_err();
        assert_eq!(
            err,
            CollectionError::NotFound {
                key: "\"missing\"".to_string()
            }
        );
    }

    #[test]
    fn test_sort_is_stable_and_reindexes() {
        let mut vec: KeyedVec<Entry> = KeyedVec::new();
        vec.append(Entry::new("c", 1)).unwrap();
        vec.append(Entry::new("a", 2)).unwrap();
        vec.append(Entry::new("b", 1)).unwrap();
        vec.append(Entry::new("d", 2)).unwrap();

        vec.sort_by(|a, b| a.value.cmp(&b.value));
        let names: Vec<_> = vec.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["c", "b", "a", "d"]);

        assert_eq!(vec.get(&"a".to_string()).unwrap().value, 2);

        vec.append(Entry::new("e", 0)).unwrap();
        vec.append(Entry::new("C", 9)).unwrap();
        let names: Vec<_> = vec.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["c", "b", "a", "d", "e"]);
    }

    #[test]
    fn test_try_extend_stops_on_error() {
        let mut vec: UniqueVec<u8> = UniqueVec::new().reject_duplicates();
        let err = vec.try_extend([1, 2, 2, 3]).unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(vec.items(), &[1, 2]);
    }

    #[test]
    fn test_empty_and_into_vec() {
        let mut vec: UniqueVec<String> = UniqueVec::default();
        assert!(vec.is_empty());

        vec.append("x".to_string()).unwrap();
        assert!(!vec.is_empty());
        assert_eq!(vec.into_vec(), vec!["x".to_string()]);
    }

    #[test]
    fn test_into_iter_and_clone() {
        let mut vec: UniqueVec<u8> = UniqueVec::new();
        vec.try_extend([3, 1, 3]).unwrap();

        let cloned = vec.clone();
        let borrowed: Vec<u8> = (&vec).into_iter().copied().collect();
        let owned: Vec<u8> = cloned.into_iter().collect();
        assert_eq!(borrowed, owned);
        assert_eq!(format!("{vec:?}"), "[3, 1]");
    }
}
