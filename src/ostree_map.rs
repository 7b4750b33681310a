//! An ordered map with order-statistic queries.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::convert::Infallible;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::mem;
use core::ops::Index;

use alloc::vec;

use crate::compare::{Comparator, NaturalOrder};
use crate::raw::{Cursor, Insertion, RawAvlTree, Side};

mod capacity;
mod order_statistic;

pub use crate::Rank;

/// Orders a borrowed key against stored keys through `Ord`.
fn natural_probe<K, Q>(key: &Q) -> impl FnMut(&K) -> Result<Ordering, Infallible>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    move |stored: &K| Ok(key.cmp(stored.borrow()))
}

/// Orders `key` against stored keys through `comparator`.
fn comparator_probe<'a, K, C>(comparator: &'a C, key: &'a K) -> impl FnMut(&K) -> Result<Ordering, C::Error>
where
    C: Comparator<K>,
{
    move |stored: &K| comparator.compare(key, stored)
}

/// An ordered map based on an [AVL tree] augmented with subtree sizes.
///
/// Entries are kept sorted by key under the map's [`Comparator`], which defaults to
/// [`NaturalOrder`]. Every node records the number of entries in its subtree, so the
/// position of a key, the entry at a position and the number of keys on either side of a
/// probe are all found in O(log n), next to the usual lookups and updates.
///
/// Maps using [`NaturalOrder`] expose infallible methods (`insert`, `get`, ...) that accept
/// any borrowed form of the key. Maps with a custom comparator use the `try_*` methods,
/// which return the comparator's error when two keys cannot be ordered. A failed
/// comparison never leaves the map partially modified.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative
/// to any other key changes while it is in the map. The behavior resulting from such a
/// logic error is not specified, but will be encapsulated to the map and will not result
/// in undefined behavior.
///
/// # Examples
///
/// ```
/// use avl_ostree::OSTreeMap;
///
/// let mut ratings = OSTreeMap::new();
/// ratings.insert("Office Space", 4);
/// ratings.insert("Pulp Fiction", 5);
/// ratings.insert("The Godfather", 5);
/// ratings.insert("The Blues Brothers", 3);
///
/// assert_eq!(ratings.get(&"Pulp Fiction"), Some(&5));
/// assert_eq!(ratings.rank_of(&"The Blues Brothers"), Some(2));
///
/// ratings.remove(&"Office Space");
/// assert_eq!(ratings.first_key_value(), Some((&"Pulp Fiction", &5)));
/// ```
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
#[derive(Clone)]
pub struct OSTreeMap<K, V, C = NaturalOrder> {
    raw: RawAvlTree<K, V>,
    comparator: C,
}

/// An iterator over the entries of an `OSTreeMap`, in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`OSTreeMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use avl_ostree::OSTreeMap;
///
/// let map = OSTreeMap::from([(2, "b"), (1, "a")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.len(), 1);
/// ```
///
/// [`iter`]: OSTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    cursor: Cursor<'a, K, V>,
}

/// An iterator over the keys of an `OSTreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`OSTreeMap`].
///
/// [`keys`]: OSTreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of an `OSTreeMap`.
///
/// This `struct` is created by the [`values`] method on [`OSTreeMap`].
///
/// [`values`]: OSTreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An owning iterator over the entries of an `OSTreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`OSTreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// # Examples
///
/// ```
/// use avl_ostree::OSTreeMap;
///
/// let map = OSTreeMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.into_iter();
/// assert_eq!(iter.next(), Some((1, "a")));
/// assert_eq!(iter.next_back(), Some((2, "b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<(K, V)>,
}

/// An owning iterator over the keys of an `OSTreeMap`.
///
/// This `struct` is created by the [`into_keys`] method on [`OSTreeMap`].
///
/// [`into_keys`]: OSTreeMap::into_keys
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

/// An owning iterator over the values of an `OSTreeMap`.
///
/// This `struct` is created by the [`into_values`] method on [`OSTreeMap`].
///
/// [`into_values`]: OSTreeMap::into_values
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> OSTreeMap<K, V> {
    /// Makes a new, empty `OSTreeMap` ordered by [`NaturalOrder`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> OSTreeMap<K, V, C> {
    /// Makes a new, empty `OSTreeMap` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::{FnComparator, OSTreeMap};
    ///
    /// let by_length = FnComparator(|a: &&str, b: &&str| Ok::<_, ()>(a.len().cmp(&b.len())));
    /// let mut map = OSTreeMap::with_comparator(by_length);
    /// map.try_insert("three", 3).unwrap();
    /// map.try_insert("one", 1).unwrap();
    /// assert_eq!(map.first_key_value(), Some((&"one", &1)));
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            raw: RawAvlTree::new(),
            comparator,
        }
    }

    /// Returns the comparator that orders the map's keys.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut a = OSTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all elements. The comparator and the allocated capacity
    /// are kept.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut a = OSTreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the first key-value pair in the map.
    /// The key in this pair is the minimum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.extreme(Side::Left).map(|handle| self.raw.entry(handle))
    }

    /// Returns the last key-value pair in the map.
    /// The key in this pair is the maximum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.extreme(Side::Right).map(|handle| self.raw.entry(handle))
    }

    /// Removes and returns the first element in the map.
    /// The key of this element is the minimum key that was in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _val)) = map.pop_first() {
    ///     assert!(map.iter().all(|(k, _v)| *k > key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_first()
    }

    /// Removes and returns the last element in the map.
    /// The key of this element is the maximum key that was in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.pop_last(), Some((2, "b")));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_last()
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            cursor: self.raw.cursor(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let map = OSTreeMap::from([(2, "b"), (1, "a")]);
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let map = OSTreeMap::from([(1, "hello"), (2, "goodbye")]);
    /// let values: Vec<&str> = map.values().cloned().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let map = OSTreeMap::from([(2, "b"), (1, "a")]);
    /// let keys: Vec<i32> = map.into_keys().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let map = OSTreeMap::from([(1, "hello"), (2, "goodbye")]);
    /// let values: Vec<&str> = map.into_values().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            inner: self.into_iter(),
        }
    }
}

impl<K, V, C: Comparator<K>> OSTreeMap<K, V, C> {
    /// Inserts a key-value pair into the map, ordering `key` with the map's comparator.
    ///
    /// If the map did not have an equal key present, `Ok(None)` is returned. Otherwise the
    /// value is updated and the old value is returned; the stored key is not replaced.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `key` could not be ordered against a stored key.
    /// The map is unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::{OSTreeMap, PartialOrder};
    ///
    /// let mut map = OSTreeMap::with_comparator(PartialOrder);
    /// assert_eq!(map.try_insert(0.5, "half"), Ok(None));
    /// assert_eq!(map.try_insert(0.5, "one half"), Ok(Some("half")));
    /// assert!(map.try_insert(f64::NAN, "nan").is_err());
    /// assert_eq!(map.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, C::Error> {
        let comparator = &self.comparator;
        match self.raw.insert(key, value, |new, stored| comparator.compare(new, stored))? {
            Insertion::Inserted => Ok(None),
            Insertion::AlreadyPresent { existing, value } => {
                Ok(Some(mem::replace(self.raw.entry_mut(existing).1, value)))
            }
        }
    }

    /// Removes a key from the map, returning the value at the key if the key was
    /// previously in the map.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `key` could not be ordered against a stored key.
    /// The map is unchanged in that case.
    pub fn try_remove(&mut self, key: &K) -> Result<Option<V>, C::Error> {
        Ok(self.try_remove_entry(key)?.map(|(_, value)| value))
    }

    /// Removes a key from the map, returning the stored key and value if the key was
    /// previously in the map.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `key` could not be ordered against a stored key.
    /// The map is unchanged in that case.
    pub fn try_remove_entry(&mut self, key: &K) -> Result<Option<(K, V)>, C::Error> {
        self.raw.delete(comparator_probe(&self.comparator, key))
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `key` could not be ordered against a stored key.
    pub fn try_get(&self, key: &K) -> Result<Option<&V>, C::Error> {
        Ok(self.try_get_key_value(key)?.map(|(_, value)| value))
    }

    /// Returns the stored key-value pair corresponding to the supplied key.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `key` could not be ordered against a stored key.
    pub fn try_get_key_value(&self, key: &K) -> Result<Option<(&K, &V)>, C::Error> {
        let found = self.raw.find(comparator_probe(&self.comparator, key))?;
        Ok(found.map(|handle| self.raw.entry(handle)))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `key` could not be ordered against a stored key.
    pub fn try_get_mut(&mut self, key: &K) -> Result<Option<&mut V>, C::Error> {
        let found = self.raw.find(comparator_probe(&self.comparator, key))?;
        Ok(found.map(|handle| self.raw.entry_mut(handle).1))
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `key` could not be ordered against a stored key.
    pub fn try_contains_key(&self, key: &K) -> Result<bool, C::Error> {
        Ok(self.raw.find(comparator_probe(&self.comparator, key))?.is_some())
    }

    /// Inserts every pair of `iter` in turn, as [`try_insert`](Self::try_insert) does.
    ///
    /// # Errors
    ///
    /// Stops at the first pair whose key cannot be ordered and returns the comparator's
    /// error. Pairs inserted before it stay in the map; the failing pair and every pair
    /// after it are dropped.
    pub fn try_extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) -> Result<(), C::Error> {
        for (key, value) in iter {
            self.try_insert(key, value)?;
        }
        Ok(())
    }
}

impl<K: Ord, V> OSTreeMap<K, V> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated, and the old
    /// value is returned. The key is not updated, though; this matters for
    /// types that can be `==` without being identical.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Ok(previous) = self.try_insert(key, value);
        previous
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the key
    /// was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Ok(removed) = self.raw.delete(natural_probe::<K, Q>(key));
        removed
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// The returned key is the one stored in the map, which can differ from the
    /// supplied one for key types where non-identical keys compare equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(String::from("apple"), 3);
    /// assert_eq!(map.get_key_value("apple"), Some((&String::from("apple"), &3)));
    /// assert_eq!(map.get_key_value("pear"), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Ok(found) = self.raw.find(natural_probe::<K, Q>(key));
        found.map(|handle| self.raw.entry(handle))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Ok(found) = self.raw.find(natural_probe::<K, Q>(key));
        found.map(|handle| self.raw.entry_mut(handle).1)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.contains_key(&1), true);
    /// assert_eq!(map.contains_key(&2), false);
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get_key_value(key).is_some()
    }
}

impl<K: Hash, V: Hash, C> Hash for OSTreeMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for OSTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, C> Eq for OSTreeMap<K, V, C> {}

impl<K: PartialOrd, V: PartialOrd, C> PartialOrd for OSTreeMap<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord, C> Ord for OSTreeMap<K, V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OSTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default> Default for OSTreeMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OSTreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = OSTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OSTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for OSTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OSTreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K, Q, V> Index<&Q> for OSTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V, C> IntoIterator for &'a OSTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for OSTreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.into_entries().into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let handle = self.cursor.next()?;
        Some(self.cursor.tree().entry(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.cursor.remaining()
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            cursor: self.cursor.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    /// Creates an empty `ostree_map::IntoIter`.
    ///
    /// ```
    /// # use avl_ostree::ostree_map;
    /// let iter: ostree_map::IntoIter<u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: vec::IntoIter::default(),
        }
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K: fmt::Debug, V> fmt::Debug for IntoKeys<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(k, _)| k)).finish()
    }
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoValues<K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for IntoValues<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(_, v)| v)).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::compare::FnComparator;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use static_assertions::assert_impl_all;

    assert_impl_all!(OSTreeMap<String, u32>: Send, Sync, Clone, Default);
    assert_impl_all!(Iter<'static, String, u32>: Send, Sync, ExactSizeIterator, FusedIterator);
    assert_impl_all!(IntoIter<String, u32>: Send, Sync, DoubleEndedIterator);

    #[test]
    fn insert_keeps_the_stored_key() {
        let mut map = OSTreeMap::new();
        map.insert(String::from("k"), 1);
        let stored = map.get_key_value("k").map(|(k, _)| k.as_ptr());

        assert_eq!(map.insert(String::from("k"), 2), Some(1));
        assert_eq!(map.get_key_value("k").map(|(k, _)| k.as_ptr()), stored);
        assert_eq!(map["k"], 2);
    }

    #[test]
    fn failed_insert_leaves_map_unchanged() {
        let fail_on_seven = FnComparator(|a: &i32, b: &i32| if *a == 7 || *b == 7 { Err(()) } else { Ok(a.cmp(b)) });
        let mut map = OSTreeMap::with_comparator(fail_on_seven);
        map.try_extend([(1, 'a'), (5, 'b'), (9, 'c')]).unwrap();

        assert_eq!(map.try_insert(7, 'x'), Err(()));
        assert_eq!(map.try_remove(&7), Err(()));
        assert_eq!(map.len(), 3);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 5, 9]);
    }

    #[test]
    fn try_extend_stops_at_the_first_failure() {
        let fail_on_zero = FnComparator(|a: &i32, b: &i32| if *a == 0 { Err("zero") } else { Ok(a.cmp(b)) });
        let mut map = OSTreeMap::with_comparator(fail_on_zero);
        map.try_insert(10, ()).unwrap();

        assert_eq!(map.try_extend([(3, ()), (0, ()), (4, ())]), Err("zero"));
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [3, 10]);
    }

    #[test]
    fn custom_comparator_orders_iteration() {
        let descending = FnComparator(|a: &u8, b: &u8| Ok::<_, Infallible>(b.cmp(a)));
        let mut map = OSTreeMap::with_comparator(descending);
        map.try_extend((0..5).map(|k| (k, k * 2))).unwrap();

        assert_eq!(map.first_key_value(), Some((&4, &8)));
        assert_eq!(map.try_get(&3), Ok(Some(&6)));
        *map.try_get_mut(&3).unwrap().unwrap() = 0;
        assert_eq!(map.try_remove_entry(&3), Ok(Some((3, 0))));
        assert_eq!(map.try_contains_key(&3), Ok(false));
        assert_eq!(map.into_keys().collect::<Vec<_>>(), [4, 2, 1, 0]);
    }

    #[test]
    fn iterators_report_exact_lengths() {
        let map = OSTreeMap::from([(3, 'c'), (1, 'a'), (2, 'b')]);
        let mut iter = map.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        assert_eq!(map.values().len(), 3);
        assert_eq!(format!("{:?}", map.keys()), "[1, 2, 3]");
        assert_eq!(format!("{map:?}"), "{1: 'a', 2: 'b', 3: 'c'}");

        let mut values = map.clone().into_values();
        assert_eq!(values.next_back(), Some('c'));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = OSTreeMap::from([(1, 'a'), (2, 'b')]);
        let mut b = OSTreeMap::new();
        b.insert(2, 'b');
        b.insert(1, 'a');
        assert_eq!(a, b);
        b.insert(3, 'c');
        assert_ne!(a, b);
        assert!(a < b);
    }
}
