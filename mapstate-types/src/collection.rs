use std::ops::Index;
use std::sync::Arc;

use ahash::{HashSet, HashSetExt};
use serde::{Deserialize, Serialize};

/// Record identified by a unique string key.
pub trait Keyed {
    /// Unique key of the record in its collection.
    fn key(&self) -> &str;
}

/// Ordered persistent collection of keyed records.
///
/// A collection never changes after it is created. All `with_*` methods return a new collection
/// that holds the very same `Arc` of every record that was not touched by the operation, so a
/// consumer can use [`Arc::ptr_eq`] to find out that a record did not change between two state
/// snapshots.
///
/// ```
/// use mapstate_types::{Collection, Keyed};
///
/// #[derive(Debug, PartialEq)]
/// struct Item(&'static str, u32);
///
/// impl Keyed for Item {
///     fn key(&self) -> &str {
///         self.0
///     }
/// }
///
/// let collection = Collection::from(vec![Item("a", 1), Item("b", 2)]);
/// let updated = collection
///     .with_updated("b", |item| Item(item.0, item.1 + 1))
///     .expect("item exists");
///
/// assert_eq!(updated.get("b").map(|item| item.1), Some(3));
/// assert!(collection.is_same_item(&updated, "a"));
/// assert!(!collection.is_same_item(&updated, "b"));
/// ```
#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T>(Arc<Vec<Arc<T>>>);

impl<T> Collection<T> {
    /// Creates a collection from already shared records.
    pub fn from_shared(items: impl IntoIterator<Item = Arc<T>>) -> Self {
        Self(Arc::new(items.into_iter().collect()))
    }

    /// Returns the count of records in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the collection contains zero records.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a record at `index`, or `None` if index is out of bounds.
    pub fn get_index(&self, index: usize) -> Option<&Arc<T>> {
        self.0.get(index)
    }

    /// Iterates over all records in the collection.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> + '_ {
        self.0.iter()
    }

    /// Returns true if both collections are the same allocation, i.e. nothing was changed
    /// between the two snapshots.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns a new collection with `item` added to the end.
    pub fn with_pushed(&self, item: T) -> Self {
        self.with_pushed_shared(Arc::new(item))
    }

    /// Returns a new collection with an already shared `item` added to the end.
    pub fn with_pushed_shared(&self, item: Arc<T>) -> Self {
        let mut items = Vec::with_capacity(self.len() + 1);
        items.extend(self.0.iter().cloned());
        items.push(item);
        Self(Arc::new(items))
    }

    /// Returns a new collection where the record at `index` is replaced by `item`. Returns `None`
    /// if `index` is out of bounds.
    pub fn with_replaced_at(&self, index: usize, item: T) -> Option<Self> {
        if index >= self.len() {
            return None;
        }

        let mut items: Vec<_> = self.0.iter().cloned().collect();
        items[index] = Arc::new(item);
        Some(Self(Arc::new(items)))
    }

    /// Returns a new collection where every record for which `f` returns `Some` is replaced by the
    /// returned value. Records for which `f` returns `None` are kept as is.
    ///
    /// A new collection is always allocated, even if `f` did not replace anything.
    pub fn with_mapped<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&T) -> Option<T>,
    {
        Self(Arc::new(
            self.0
                .iter()
                .map(|item| match f(&**item) {
                    Some(replacement) => Arc::new(replacement),
                    None => item.clone(),
                })
                .collect(),
        ))
    }

    /// Returns a new collection retaining only the records specified by the predicate.
    pub fn with_retained<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        Self(Arc::new(
            self.0.iter().filter(|item| f(&***item)).cloned().collect(),
        ))
    }
}

impl<T: Keyed> Collection<T> {
    /// Returns the record with the given key.
    pub fn get(&self, key: &str) -> Option<&Arc<T>> {
        self.0.iter().find(|item| item.key() == key)
    }

    /// Returns the position of the record with the given key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.0.iter().position(|item| item.key() == key)
    }

    /// Returns true if a record with the given key is in the collection.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Iterates over keys of the records.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|item| item.key())
    }

    /// Returns true if the record with the given key is the same allocation in both collections.
    /// Returns false if the record is missing from either of them.
    pub fn is_same_item(&self, other: &Self, key: &str) -> bool {
        match (self.get(key), other.get(key)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns a new collection with the record identified by `key` replaced by the result of `f`.
    /// Returns `None` if there is no such record.
    pub fn with_updated<F>(&self, key: &str, f: F) -> Option<Self>
    where
        F: FnOnce(&T) -> T,
    {
        let index = self.position(key)?;
        let mut items: Vec<_> = self.0.iter().cloned().collect();
        let updated = Arc::new(f(&*items[index]));
        items[index] = updated;
        Some(Self(Arc::new(items)))
    }

    /// Returns a new collection without records whose keys are listed in `keys`. Keys that match
    /// nothing are ignored.
    pub fn without_keys<K: AsRef<str>>(&self, keys: &[K]) -> Self {
        self.with_retained(|item| !keys.iter().any(|key| key.as_ref() == item.key()))
    }

    /// Returns a new collection that contains records of the sequence `[self..., incoming...]`,
    /// keeping only the first occurrence of every key.
    ///
    /// A record in `incoming` with a key already present in the collection is dropped, it does
    /// not replace the existing record.
    ///
    /// ```
    /// use mapstate_types::{Collection, Keyed};
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Item(&'static str, u32);
    ///
    /// impl Keyed for Item {
    ///     fn key(&self) -> &str {
    ///         self.0
    ///     }
    /// }
    ///
    /// let collection = Collection::from(vec![Item("a", 1)]);
    /// let merged = collection.merged_keep_first(vec![Item("a", 2), Item("b", 3), Item("b", 4)]);
    ///
    /// assert_eq!(merged.len(), 2);
    /// assert_eq!(merged.get("a").map(|item| item.1), Some(1));
    /// assert_eq!(merged.get("b").map(|item| item.1), Some(3));
    /// ```
    pub fn merged_keep_first(&self, incoming: impl IntoIterator<Item = T>) -> Self {
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(self.len());

        for item in self.0.iter() {
            if seen.insert(item.key().to_string()) {
                items.push(item.clone());
            }
        }

        for item in incoming {
            if seen.insert(item.key().to_string()) {
                items.push(Arc::new(item));
            }
        }

        Self(Arc::new(items))
    }
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self(Arc::new(Vec::new()))
    }
}

impl<T: PartialEq> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Index<usize> for Collection<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(value: Vec<T>) -> Self {
        value.into_iter().collect()
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(Arc::new(iter.into_iter().map(Arc::new).collect()))
    }
}
