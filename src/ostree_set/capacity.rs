use super::OSTreeSet;
use crate::OSTreeMap;

impl<T> OSTreeSet<T> {
    /// Creates an empty set with capacity for at least `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let set: OSTreeSet<i32> = OSTreeSet::with_capacity(32);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OSTreeSet {
            map: OSTreeMap::with_capacity(capacity),
        }
    }
}

impl<T, C> OSTreeSet<T, C> {
    /// Creates an empty set ordered by `comparator` with capacity for at least `capacity`
    /// elements.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        OSTreeSet {
            map: OSTreeMap::with_capacity_and_comparator(capacity, comparator),
        }
    }

    /// Returns the number of elements the set can hold without reallocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }
}
