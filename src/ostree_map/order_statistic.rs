use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::{OSTreeMap, comparator_probe, natural_probe};
use crate::Rank;
use crate::compare::Comparator;

impl<K, V, C> OSTreeMap<K, V, C> {
    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// let (key, value) = map.get_by_rank(1).unwrap();
    /// assert_eq!((key, value), (&"b", &20));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.select(rank).map(|handle| self.raw.entry(handle))
    }

    /// Returns the key and a mutable reference to the value at position `rank`
    /// in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    /// The key is returned as a shared reference because mutating it would
    /// violate the map's ordering invariants.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(10, "a");
    /// map.insert(5, "b");
    ///
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.raw.select(rank)?;
        Some(self.raw.entry_mut(handle))
    }
}

impl<K, V, C: Comparator<K>> OSTreeMap<K, V, C> {
    /// Returns the zero-based rank of `key` in sorted order, or `None` if the
    /// key is not present.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `key` could not be ordered against a stored key.
    pub fn try_rank_of(&self, key: &K) -> Result<Option<usize>, C::Error> {
        self.raw.rank_of(comparator_probe(&self.comparator, key))
    }

    /// Returns the entry with the greatest key less than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `key` could not be ordered against a stored key.
    pub fn try_at_most(&self, key: &K) -> Result<Option<(&K, &V)>, C::Error> {
        let (found, _) = self.raw.predecessor_or_equal(comparator_probe(&self.comparator, key))?;
        Ok(found.map(|handle| self.raw.entry(handle)))
    }

    /// Returns the entry with the smallest key greater than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `key` could not be ordered against a stored key.
    pub fn try_at_least(&self, key: &K) -> Result<Option<(&K, &V)>, C::Error> {
        let (found, _) = self.raw.successor_or_equal(comparator_probe(&self.comparator, key))?;
        Ok(found.map(|handle| self.raw.entry(handle)))
    }

    /// Returns the number of keys less than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `key` could not be ordered against a stored key.
    pub fn try_count_at_most(&self, key: &K) -> Result<usize, C::Error> {
        let (_, count) = self.raw.predecessor_or_equal(comparator_probe(&self.comparator, key))?;
        Ok(count)
    }

    /// Returns the number of keys greater than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `key` could not be ordered against a stored key.
    pub fn try_count_at_least(&self, key: &K) -> Result<usize, C::Error> {
        let (_, count) = self.raw.successor_or_equal(comparator_probe(&self.comparator, key))?;
        Ok(count)
    }
}

impl<K: Ord, V> OSTreeMap<K, V> {
    /// Returns the zero-based rank of `key` in sorted order, or `None` if the
    /// key is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(10, "a");
    /// map.insert(20, "b");
    ///
    /// assert_eq!(map.rank_of(&10), Some(0));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Ok(rank) = self.raw.rank_of(natural_probe::<K, Q>(key));
        rank
    }

    /// Returns the entry with the greatest key less than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let map = OSTreeMap::from([(1, 'a'), (5, 'e'), (9, 'i')]);
    /// assert_eq!(map.at_most(&6), Some((&5, &'e')));
    /// assert_eq!(map.at_most(&5), Some((&5, &'e')));
    /// assert_eq!(map.at_most(&0), None);
    /// ```
    #[must_use]
    pub fn at_most<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Ok((found, _)) = self.raw.predecessor_or_equal(natural_probe::<K, Q>(key));
        found.map(|handle| self.raw.entry(handle))
    }

    /// Returns the entry with the smallest key greater than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let map = OSTreeMap::from([(1, 'a'), (5, 'e'), (9, 'i')]);
    /// assert_eq!(map.at_least(&6), Some((&9, &'i')));
    /// assert_eq!(map.at_least(&10), None);
    /// ```
    #[must_use]
    pub fn at_least<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Ok((found, _)) = self.raw.successor_or_equal(natural_probe::<K, Q>(key));
        found.map(|handle| self.raw.entry(handle))
    }

    /// Returns the number of keys less than or equal to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let map = OSTreeMap::from([(1, 'a'), (5, 'e'), (9, 'i')]);
    /// assert_eq!(map.count_at_most(&5), 2);
    /// assert_eq!(map.count_at_most(&0), 0);
    /// ```
    #[must_use]
    pub fn count_at_most<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Ok((_, count)) = self.raw.predecessor_or_equal(natural_probe::<K, Q>(key));
        count
    }

    /// Returns the number of keys greater than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let map = OSTreeMap::from([(1, 'a'), (5, 'e'), (9, 'i')]);
    /// assert_eq!(map.count_at_least(&5), 2);
    /// assert_eq!(map.count_at_least(&10), 0);
    /// ```
    #[must_use]
    pub fn count_at_least<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Ok((_, count)) = self.raw.successor_or_equal(natural_probe::<K, Q>(key));
        count
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use avl_ostree::{OSTreeMap, Rank};
///
/// let mut map = OSTreeMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V, C> Index<Rank> for OSTreeMap<K, V, C> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use avl_ostree::{OSTreeMap, Rank};
///
/// let mut map = OSTreeMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K, V, C> IndexMut<Rank> for OSTreeMap<K, V, C> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
