use super::OSTreeMap;
use crate::compare::NaturalOrder;
use crate::raw::RawAvlTree;

impl<K, V> OSTreeMap<K, V> {
    /// Creates an empty map with capacity for at least `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let map: OSTreeMap<i32, i32> = OSTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<K, V, C> OSTreeMap<K, V, C> {
    /// Creates an empty map ordered by `comparator` with capacity for at least `capacity`
    /// elements.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        OSTreeMap {
            raw: RawAvlTree::with_capacity(capacity),
            comparator,
        }
    }

    /// Returns the number of elements the map can hold without reallocating.
    ///
    /// Removing elements does not shrink the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::with_capacity(8);
    /// map.extend((0..8).map(|i| (i, i)));
    /// map.clear();
    /// assert!(map.capacity() >= 8);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
