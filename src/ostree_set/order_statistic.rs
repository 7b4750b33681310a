use core::borrow::Borrow;
use core::ops::Index;

use super::OSTreeSet;
use crate::Rank;
use crate::compare::Comparator;

impl<T, C> OSTreeSet<T, C> {
    /// Returns the value at position `rank` in sorted order.
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
    /// use avl_ostree::OSTreeSet;
    ///
    /// let set = OSTreeSet::from([10, 20, 30]);
    /// assert_eq!(set.get_by_rank(1), Some(&20));
    /// assert!(set.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.map.get_by_rank(rank).map(|(k, ())| k)
    }
}

impl<T, C: Comparator<T>> OSTreeSet<T, C> {
    /// Returns the zero-based rank of `value` in sorted order, or `None` if the value is
    /// not present.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `value` could not be ordered against a stored
    /// item.
    pub fn try_rank_of(&self, value: &T) -> Result<Option<usize>, C::Error> {
        self.map.try_rank_of(value)
    }

    /// Returns the greatest item less than or equal to `value`.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `value` could not be ordered against a stored
    /// item.
    pub fn try_at_most(&self, value: &T) -> Result<Option<&T>, C::Error> {
        Ok(self.map.try_at_most(value)?.map(|(k, ())| k))
    }

    /// Returns the smallest item greater than or equal to `value`.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `value` could not be ordered against a stored
    /// item.
    pub fn try_at_least(&self, value: &T) -> Result<Option<&T>, C::Error> {
        Ok(self.map.try_at_least(value)?.map(|(k, ())| k))
    }

    /// Returns the number of items less than or equal to `value`.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `value` could not be ordered against a stored
    /// item.
    pub fn try_count_at_most(&self, value: &T) -> Result<usize, C::Error> {
        self.map.try_count_at_most(value)
    }

    /// Returns the number of items greater than or equal to `value`.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `value` could not be ordered against a stored
    /// item.
    pub fn try_count_at_least(&self, value: &T) -> Result<usize, C::Error> {
        self.map.try_count_at_least(value)
    }
}

impl<T: Ord> OSTreeSet<T> {
    /// Returns the zero-based rank of `value` in sorted order, or `None` if
    /// the value is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let set = OSTreeSet::from([10, 20]);
    /// assert_eq!(set.rank_of(&20), Some(1));
    /// assert_eq!(set.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.rank_of(value)
    }

    /// Returns the greatest item less than or equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let set = OSTreeSet::from([1, 3, 4, 5, 7, 8, 9]);
    /// assert_eq!(set.at_most(&6), Some(&5));
    /// assert_eq!(set.at_most(&0), None);
    /// ```
    #[must_use]
    pub fn at_most<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.at_most(value).map(|(k, ())| k)
    }

    /// Returns the smallest item greater than or equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let set = OSTreeSet::from([1, 3, 4, 5, 7, 8, 9]);
    /// assert_eq!(set.at_least(&6), Some(&7));
    /// assert_eq!(set.at_least(&10), None);
    /// ```
    #[must_use]
    pub fn at_least<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.at_least(value).map(|(k, ())| k)
    }

    /// Returns the number of items less than or equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let set = OSTreeSet::from([1, 3, 4, 5, 7, 8, 9]);
    /// assert_eq!(set.count_at_most(&6), 4);
    /// ```
    #[must_use]
    pub fn count_at_most<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.count_at_most(value)
    }

    /// Returns the number of items greater than or equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let set = OSTreeSet::from([1, 3, 4, 5, 7, 8, 9]);
    /// assert_eq!(set.count_at_least(&6), 3);
    /// ```
    #[must_use]
    pub fn count_at_least<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.count_at_least(value)
    }
}

/// Indexes into the set by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use avl_ostree::{OSTreeSet, Rank};
///
/// let set = OSTreeSet::from([10, 20, 30]);
/// assert_eq!(set[Rank(1)], 20);
/// ```
impl<T, C> Index<Rank> for OSTreeSet<T, C> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}
