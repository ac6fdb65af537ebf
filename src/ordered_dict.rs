//! Ordered dictionary implementation.
//!
//! This module provides the core [`OrderedDict`] type and its iterators. The
//! dictionary keeps its entries in a circular doubly-linked list anchored by a
//! permanent sentinel, and indexes them by key through a hash table, so every
//! lookup, insertion, removal, and reordering is O(1).
//!
//! # Examples
//!
//! ```
//! use ordered_dict::ordered_dict::OrderedDict;
//!
//! let mut dict = OrderedDict::new();
//! dict.set("first", 1);
//! dict.set("second", 2);
//!
//! // Iteration preserves insertion order
//! let entries: Vec<_> = dict.iter().collect();
//! assert_eq!(entries, [(&"first", &1), (&"second", &2)]);
//! ```

use core::borrow::Borrow;
use core::fmt;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::ops::Index;

use hashbrown::HashTable;
use hashbrown::hash_table;

use crate::Ptr;
use crate::RandomState;
use crate::arena::Arena;
use crate::arena::Node;

mod iter;

pub use iter::IntoIter;
pub use iter::Iter;
pub use iter::IterMut;
pub use iter::Keys;
pub use iter::Values;
pub use iter::ValuesMut;

#[cold]
#[inline(never)]
fn missing_from_index() -> ! {
    panic!("Linked node not found in index");
}

/// A hash map that keeps its entries in a deterministic, rearrangeable order.
///
/// New keys are appended at the end of the order. Updating an existing key
/// keeps its position. Entries can be removed from either end with
/// [`pop`](Self::pop) and [`shift`](Self::shift), and moved to either end with
/// [`to_start`](Self::to_start) and [`to_end`](Self::to_end). All of these run
/// in O(1).
///
/// The generic parameters are:
/// - `K`: Key type, must implement `Hash + Eq`
/// - `T`: Value type
/// - `S`: Hash builder type, defaults to the standard hasher
///
/// # Examples
///
/// ```
/// use ordered_dict::ordered_dict::OrderedDict;
///
/// let mut dict = OrderedDict::new();
/// dict.set("apple", 5).set("banana", 3).set("cherry", 8);
///
/// // Least recently used first: touching "apple" moves it to the end.
/// dict.to_end(&"apple");
/// assert_eq!(dict.shift(), Some(("banana", 3)));
/// ```
#[derive(Clone)]
pub struct OrderedDict<K, T, S = RandomState> {
    nodes: Arena<K, T>,
    table: HashTable<Ptr>,
    hasher: S,
}

impl<K: fmt::Debug, T: fmt::Debug, S> fmt::Debug for OrderedDict<K, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders the dictionary as its sequence, framed by the sentinel `$`.
///
/// # Examples
///
/// ```
/// use ordered_dict::OrderedDict;
///
/// let mut dict: OrderedDict<i32, &str> = OrderedDict::new();
/// assert_eq!(dict.to_string(), "$ empty $");
///
/// dict.set(1, "a").set(2, "b");
/// assert_eq!(dict.to_string(), "$ -> (1, a) -> (2, b) -> $");
/// ```
impl<K: fmt::Display, T: fmt::Display, S> fmt::Display for OrderedDict<K, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("$ empty $");
        }

        f.write_str("$")?;
        for (key, value) in self.iter() {
            write!(f, " -> ({key}, {value})")?;
        }
        f.write_str(" -> $")
    }
}

impl<K, T, S: Default> Default for OrderedDict<K, T, S> {
    fn default() -> Self {
        OrderedDict::with_capacity_and_hasher(0, S::default())
    }
}

impl<K, T> OrderedDict<K, T> {
    /// Creates a new, empty dictionary.
    ///
    /// Only the sentinel slot is allocated up front.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict: OrderedDict<&str, i32> = OrderedDict::new();
    /// assert!(dict.is_empty());
    /// dict.set("key", 42);
    /// assert!(!dict.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new dictionary able to hold at least `capacity` entries
    /// without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let dict: OrderedDict<&str, i32> = OrderedDict::with_capacity(10);
    /// assert_eq!(dict.len(), 0);
    /// assert!(dict.capacity() >= 10);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::default())
    }
}

impl<K, T, S> OrderedDict<K, T, S> {
    /// Creates an empty dictionary which will use the given hash builder.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    /// Creates a dictionary with the specified capacity and hasher.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hashbrown::DefaultHashBuilder as RandomState;
    /// use ordered_dict::ordered_dict::OrderedDict;
    ///
    /// let hasher = RandomState::default();
    /// let mut dict: OrderedDict<&str, i32, _> = OrderedDict::with_capacity_and_hasher(10, hasher);
    /// dict.set("key", 42);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        OrderedDict {
            nodes: Arena::with_capacity(capacity),
            table: HashTable::with_capacity(capacity),
            hasher,
        }
    }

    /// Returns a reference to the dictionary's hash builder.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Returns the number of entries in the dictionary.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut a = OrderedDict::new();
    /// assert_eq!(a.len(), 0);
    /// a.set(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.table.len(), self.nodes.len());
        self.table.len()
    }

    /// Returns `true` if the dictionary contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of entries the dictionary can hold without
    /// reallocating.
    pub fn capacity(&self) -> usize {
        self.table.capacity().min(self.nodes.capacity())
    }

    /// Removes every entry, returning the dictionary to its freshly created
    /// state.
    ///
    /// The sentinel is relinked to itself and the index emptied. Allocated
    /// memory is kept for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set(1, 10).set(2, 20).set(3, 30);
    /// dict.clear();
    /// assert!(dict.is_empty());
    /// assert_eq!(dict.to_string(), "$ empty $");
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
        self.nodes.clear();
    }

    /// Returns the first entry without removing it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict: OrderedDict<&str, i32> = OrderedDict::new();
    /// assert_eq!(dict.front(), None);
    /// dict.set("a", 1).set("b", 2);
    /// assert_eq!(dict.front(), Some((&"a", &1)));
    /// ```
    pub fn front(&self) -> Option<(&K, &T)> {
        self.nodes
            .node(self.nodes.first())
            .map(|node| (&node.key, &node.value))
    }

    /// Returns the last entry without removing it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict: OrderedDict<&str, i32> = OrderedDict::new();
    /// assert_eq!(dict.back(), None);
    /// dict.set("a", 1).set("b", 2);
    /// assert_eq!(dict.back(), Some((&"b", &2)));
    /// ```
    pub fn back(&self) -> Option<(&K, &T)> {
        self.nodes
            .node(self.nodes.last())
            .map(|node| (&node.key, &node.value))
    }

    /// Returns an iterator over the entries in order.
    ///
    /// Each call starts a fresh traversal from the first entry. The iterator
    /// borrows the dictionary, so it cannot be mutated until the iterator is
    /// dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set(1, 10).set(2, 20).set(3, 30);
    ///
    /// let entries: Vec<_> = dict.iter().collect();
    /// assert_eq!(entries, [(&1, &10), (&2, &20), (&3, &30)]);
    ///
    /// let reversed: Vec<_> = dict.iter().rev().map(|(k, _)| *k).collect();
    /// assert_eq!(reversed, [3, 2, 1]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, T> {
        Iter::new(&self.nodes)
    }

    /// Returns an iterator over the entries in order, with mutable references
    /// to the values.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set("a", 1).set("b", 2).set("c", 3);
    ///
    /// for (key, value) in dict.iter_mut() {
    ///     if key == &"b" {
    ///         *value *= 10;
    ///     }
    /// }
    ///
    /// assert_eq!(dict.get(&"b"), Some(&20));
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, T> {
        IterMut::new(&mut self.nodes)
    }

    /// Returns an iterator over the keys in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set(1, 10).set(2, 20).set(3, 30);
    ///
    /// let keys: Vec<_> = dict.keys().collect();
    /// assert_eq!(keys, [&1, &2, &3]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, T> {
        Keys { iter: self.iter() }
    }

    /// Returns an iterator over the values in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set(1, 10).set(2, 20).set(3, 30);
    ///
    /// let values: Vec<_> = dict.values().collect();
    /// assert_eq!(values, [&10, &20, &30]);
    /// ```
    pub fn values(&self) -> Values<'_, K, T> {
        Values { iter: self.iter() }
    }

    /// Returns an iterator over mutable references to the values in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set("a", 1).set("b", 2);
    ///
    /// for value in dict.values_mut() {
    ///     *value *= 2;
    /// }
    ///
    /// let values: Vec<_> = dict.values().collect();
    /// assert_eq!(values, [&2, &4]);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, T> {
        ValuesMut {
            iter: self.iter_mut(),
        }
    }
}

impl<K, T, S> PartialEq for OrderedDict<K, T, S>
where
    K: Hash + Eq,
    T: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter()
            .all(|(key, value)| other.get(key).is_some_and(|v| *value == *v))
    }
}

impl<K, T, S> Eq for OrderedDict<K, T, S>
where
    K: Hash + Eq,
    T: Eq,
    S: BuildHasher,
{
}

impl<K, T, S> FromIterator<(K, T)> for OrderedDict<K, T, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut dict = Self::with_capacity_and_hasher(iter.size_hint().0, S::default());
        dict.extend(iter);
        dict
    }
}

/// Builds a dictionary from an array of pairs, as if by calling
/// [`set`](OrderedDict::set) for each pair in order.
///
/// # Examples
///
/// ```
/// use ordered_dict::OrderedDict;
///
/// let dict = OrderedDict::from([("a", 1), ("b", 2), ("a", 3)]);
/// let entries: Vec<_> = dict.iter().collect();
/// assert_eq!(entries, [(&"a", &3), (&"b", &2)]);
/// ```
impl<K, T, S, const N: usize> From<[(K, T); N]> for OrderedDict<K, T, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from(entries: [(K, T); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, T, S> Extend<(K, T)> for OrderedDict<K, T, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, K, T, S> Extend<(&'a K, &'a T)> for OrderedDict<K, T, S>
where
    K: Hash + Eq + Clone,
    T: Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key.clone(), value.clone());
        }
    }
}

impl<K, T, S> IntoIterator for OrderedDict<K, T, S> {
    type IntoIter = IntoIter<K, T>;
    type Item = (K, T);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.nodes)
    }
}

impl<'a, K, T, S> IntoIterator for &'a OrderedDict<K, T, S> {
    type IntoIter = Iter<'a, K, T>;
    type Item = (&'a K, &'a T);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, T, S> IntoIterator for &'a mut OrderedDict<K, T, S> {
    type IntoIter = IterMut<'a, K, T>;
    type Item = (&'a K, &'a mut T);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K: Hash + Eq, T, S: BuildHasher> OrderedDict<K, T, S> {
    /// Reserves capacity for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        let nodes = &self.nodes;
        self.table.reserve(additional, |&ptr| nodes[ptr].hash);
        self.nodes.reserve(additional);
    }

    /// Shrinks the capacity of the dictionary as much as possible.
    pub fn shrink_to_fit(&mut self) {
        let nodes = &self.nodes;
        self.table.shrink_to_fit(|&ptr| nodes[ptr].hash);
        self.nodes.shrink_to_fit();
    }

    fn find<Q>(&self, key: &Q) -> Option<Ptr>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);
        self.table
            .find(hash, |&ptr| <K as Borrow<Q>>::borrow(&self.nodes[ptr].key) == key)
            .copied()
    }

    /// Drops `ptr` from the index, then unlinks and frees its node. The index
    /// and the sequence are both updated before this returns.
    fn remove_ptr(&mut self, ptr: Ptr) -> (K, T) {
        let hash = self.nodes[ptr].hash;
        match self.table.find_entry(hash, |&candidate| candidate == ptr) {
            Ok(occupied) => {
                occupied.remove();
            }
            Err(_) => missing_from_index(),
        }

        let Node { key, value, .. } = self.nodes.free(ptr);
        (key, value)
    }

    /// Sets the value for `key`, returning the dictionary for chaining.
    ///
    /// If `key` is already present its value is replaced in place and its
    /// position is unchanged. Otherwise the entry is appended at the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set(1, 10).set(2, 20).set(3, 30);
    /// dict.set(2, 40);
    ///
    /// let entries: Vec<_> = dict.iter().collect();
    /// assert_eq!(entries, [(&1, &10), (&2, &40), (&3, &30)]);
    /// ```
    pub fn set(&mut self, key: K, value: T) -> &mut Self {
        self.insert(key, value);
        self
    }

    /// Inserts a key-value pair, returning the value it replaced.
    ///
    /// Placement follows [`set`](Self::set): new keys are appended at the
    /// end, existing keys keep their position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// assert_eq!(dict.insert(37, "a"), None);
    /// assert_eq!(dict.insert(37, "b"), Some("a"));
    /// assert_eq!(dict.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: T) -> Option<T> {
        let hash = self.hasher.hash_one(&key);
        let entry = self.table.entry(
            hash,
            |&ptr| self.nodes[ptr].key == key,
            |&ptr| self.nodes[ptr].hash,
        );

        match entry {
            hash_table::Entry::Occupied(occupied) => {
                let ptr = *occupied.get();
                Some(core::mem::replace(&mut self.nodes[ptr].value, value))
            }
            hash_table::Entry::Vacant(vacant) => {
                let ptr = self.nodes.alloc(Node { hash, key, value });
                self.nodes.link_before(ptr, Ptr::SENTINEL);
                vacant.insert(ptr);
                None
            }
        }
    }

    /// Returns a reference to the value for `key`, or `None` if the key is
    /// absent.
    ///
    /// The key may be any borrowed form of the dictionary's key type, but
    /// `Hash` and `Eq` on the borrowed form must match those for the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set(1, Some("a")).set(2, None);
    /// assert_eq!(dict.get(&1), Some(&Some("a")));
    /// // A stored `None` is distinct from an absent key.
    /// assert_eq!(dict.get(&2), Some(&None));
    /// assert_eq!(dict.get(&3), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|ptr| &self.nodes[ptr].value)
    }

    /// Returns a mutable reference to the value for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set(1, "a");
    /// if let Some(x) = dict.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(dict.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let ptr = self.find(key)?;
        Some(&mut self.nodes[ptr].value)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &T)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|ptr| {
            let node = &self.nodes[ptr];
            (&node.key, &node.value)
        })
    }

    /// Returns `true` if the dictionary contains `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set(String::from("a"), 1);
    /// assert!(dict.contains_key("a"));
    /// assert!(!dict.contains_key("b"));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Deletes `key`, returning whether it was present.
    ///
    /// Deleting an absent key is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set(1, 10).set(2, 20).set(3, 30);
    ///
    /// assert!(dict.delete(&2));
    /// assert!(!dict.delete(&2));
    /// assert_eq!(dict.to_string(), "$ -> (1, 10) -> (3, 30) -> $");
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set(1, "a");
    /// assert_eq!(dict.remove(&1), Some("a"));
    /// assert_eq!(dict.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the stored key and value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set(1, "a");
    /// assert_eq!(dict.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(dict.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, T)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);
        let (ptr, _) = self
            .table
            .find_entry(hash, |&ptr| {
                <K as Borrow<Q>>::borrow(&self.nodes[ptr].key) == key
            })
            .ok()?
            .remove();

        let Node { key, value, .. } = self.nodes.free(ptr);
        Some((key, value))
    }

    /// Removes and returns the last entry, or `None` if the dictionary is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict: OrderedDict<i32, i32> = OrderedDict::new();
    /// assert_eq!(dict.pop(), None);
    ///
    /// dict.set(1, 10).set(2, 20).set(3, 30);
    /// assert_eq!(dict.pop(), Some((3, 30)));
    /// assert_eq!(dict.to_string(), "$ -> (1, 10) -> (2, 20) -> $");
    /// ```
    pub fn pop(&mut self) -> Option<(K, T)> {
        let ptr = self.nodes.last();
        if ptr == Ptr::SENTINEL {
            return None;
        }
        Some(self.remove_ptr(ptr))
    }

    /// Removes and returns the first entry, or `None` if the dictionary is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict: OrderedDict<i32, i32> = OrderedDict::new();
    /// assert_eq!(dict.shift(), None);
    ///
    /// dict.set(1, 10).set(2, 20);
    /// assert_eq!(dict.shift(), Some((1, 10)));
    /// assert_eq!(dict.iter().collect::<Vec<_>>(), [(&2, &20)]);
    /// ```
    pub fn shift(&mut self) -> Option<(K, T)> {
        let ptr = self.nodes.first();
        if ptr == Ptr::SENTINEL {
            return None;
        }
        Some(self.remove_ptr(ptr))
    }

    /// Moves `key` to the start of the order, returning whether it was
    /// present. The value is untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set(1, 10).set(2, 20).set(3, 30);
    ///
    /// assert!(dict.to_start(&3));
    /// assert!(!dict.to_start(&4));
    /// assert_eq!(dict.to_string(), "$ -> (3, 30) -> (1, 10) -> (2, 20) -> $");
    /// ```
    pub fn to_start<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(ptr) = self.find(key) else {
            return false;
        };
        self.nodes.unlink(ptr);
        self.nodes.link_after(ptr, Ptr::SENTINEL);
        true
    }

    /// Moves `key` to the end of the order, returning whether it was present.
    /// The value is untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict = OrderedDict::new();
    /// dict.set(1, 10).set(2, 20).set(3, 30);
    ///
    /// assert!(dict.to_end(&1));
    /// assert!(!dict.to_end(&4));
    /// assert_eq!(dict.to_string(), "$ -> (2, 20) -> (3, 30) -> (1, 10) -> $");
    /// ```
    pub fn to_end<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(ptr) = self.find(key) else {
            return false;
        };
        self.nodes.unlink(ptr);
        self.nodes.link_before(ptr, Ptr::SENTINEL);
        true
    }

    /// Retains only the entries specified by the predicate.
    ///
    /// Entries are visited in order, and the predicate may modify values.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_dict::OrderedDict;
    ///
    /// let mut dict: OrderedDict<i32, i32> = (1..=6).map(|i| (i, i * 10)).collect();
    /// dict.retain(|key, value| {
    ///     *value += 1;
    ///     key % 2 == 0
    /// });
    ///
    /// let entries: Vec<_> = dict.iter().collect();
    /// assert_eq!(entries, [(&2, &21), (&4, &41), (&6, &61)]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut T) -> bool,
    {
        let mut ptr = self.nodes.first();
        while ptr != Ptr::SENTINEL {
            let next = self.nodes.next(ptr);
            let node = &mut self.nodes[ptr];
            if !f(&node.key, &mut node.value) {
                self.remove_ptr(ptr);
            }
            ptr = next;
        }
    }
}

/// Panics if the key is not present, like `HashMap`'s `Index` impl.
impl<K, Q, T, S> Index<&Q> for OrderedDict<K, T, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = T;

    fn index(&self, key: &Q) -> &Self::Output {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found in OrderedDict"),
        }
    }
}
