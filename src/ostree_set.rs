//! An ordered set with order-statistic queries.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::OSTreeMap;
use crate::compare::{Comparator, NaturalOrder};
use crate::ostree_map::{IntoKeys, Keys};

mod capacity;
mod order_statistic;

pub use crate::Rank;

/// An ordered set based on an AVL tree augmented with subtree sizes.
///
/// See [`OSTreeMap`]'s documentation for a detailed discussion of this collection's
/// performance benefits and drawbacks.
///
/// Values are ordered by the set's [`Comparator`], which defaults to [`NaturalOrder`].
/// Sets using a custom comparator are updated and queried through the `try_*` methods;
/// when a comparison fails, those methods return the comparator's error and leave the set
/// unchanged.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering
/// relative to any other item changes while it is in the set. The behavior resulting from
/// such a logic error is not specified, but will be encapsulated to the set and will not
/// result in undefined behavior.
///
/// # Examples
///
/// ```
/// use avl_ostree::OSTreeSet;
///
/// let mut books = OSTreeSet::new();
///
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// if !books.contains(&"The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.", books.len());
/// }
///
/// books.remove(&"The Odyssey");
/// assert_eq!(books.rank_of(&"To Kill a Mockingbird"), Some(2));
///
/// for book in &books {
///     println!("{book}");
/// }
/// ```
#[derive(Clone)]
pub struct OSTreeSet<T, C = NaturalOrder> {
    map: OSTreeMap<T, (), C>,
}

/// An iterator over the items of an `OSTreeSet`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`OSTreeSet`]. See its
/// documentation for more.
///
/// [`iter`]: OSTreeSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: Keys<'a, T, ()>,
}

/// An owning iterator over the items of an `OSTreeSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`OSTreeSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: OSTreeSet#method.into_iter
pub struct IntoIter<T> {
    inner: IntoKeys<T, ()>,
}

impl<T> OSTreeSet<T> {
    /// Makes a new, empty `OSTreeSet` ordered by [`NaturalOrder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let mut set = OSTreeSet::new();
    ///
    /// // entries can now be inserted into the empty set
    /// set.insert(1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> Self {
        OSTreeSet { map: OSTreeMap::new() }
    }
}

impl<T, C> OSTreeSet<T, C> {
    /// Makes a new, empty `OSTreeSet` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::{OSTreeSet, PartialOrder};
    ///
    /// let mut set = OSTreeSet::with_comparator(PartialOrder);
    /// set.try_insert(2.5).unwrap();
    /// assert_eq!(set.first(), Some(&2.5));
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        OSTreeSet {
            map: OSTreeMap::with_comparator(comparator),
        }
    }

    /// Returns the comparator that orders the set's items.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.map.comparator()
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let mut v = OSTreeSet::new();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clears the set, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let mut v = OSTreeSet::new();
    /// v.insert(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns a reference to the first element in the set, if any.
    /// This element is always the minimum of all elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let mut set = OSTreeSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// set.insert(2);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(k, ())| k)
    }

    /// Returns a reference to the last element in the set, if any.
    /// This element is always the maximum of all elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let set = OSTreeSet::from([1, 2]);
    /// assert_eq!(set.last(), Some(&2));
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(k, ())| k)
    }

    /// Removes the first element from the set and returns it, if any.
    /// The first element is always the minimum element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let mut set = OSTreeSet::new();
    ///
    /// set.insert(1);
    /// while let Some(n) = set.pop_first() {
    ///     assert_eq!(n, 1);
    /// }
    /// assert!(set.is_empty());
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        self.map.pop_first().map(|(k, ())| k)
    }

    /// Removes the last element from the set and returns it, if any.
    /// The last element is always the maximum element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let mut set = OSTreeSet::from([1, 2]);
    /// assert_eq!(set.pop_last(), Some(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn pop_last(&mut self) -> Option<T> {
        self.map.pop_last().map(|(k, ())| k)
    }

    /// Gets an iterator that visits the elements in the `OSTreeSet` in ascending
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let set = OSTreeSet::from([3, 1, 2]);
    /// let mut set_iter = set.iter();
    /// assert_eq!(set_iter.next(), Some(&1));
    /// assert_eq!(set_iter.next(), Some(&2));
    /// assert_eq!(set_iter.next(), Some(&3));
    /// assert_eq!(set_iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.map.keys() }
    }
}

impl<T, C: Comparator<T>> OSTreeSet<T, C> {
    /// Adds a value to the set, ordering it with the set's comparator.
    ///
    /// Returns whether the value was newly inserted. An equal value already in the set is
    /// kept and `value` is dropped.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `value` could not be ordered against a stored
    /// item. The set is unchanged in that case.
    pub fn try_insert(&mut self, value: T) -> Result<bool, C::Error> {
        Ok(self.map.try_insert(value, ())?.is_none())
    }

    /// Removes a value from the set. Returns whether the value was present.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `value` could not be ordered against a stored
    /// item. The set is unchanged in that case.
    pub fn try_remove(&mut self, value: &T) -> Result<bool, C::Error> {
        Ok(self.try_take(value)?.is_some())
    }

    /// Removes and returns the stored item equal to `value`, if any.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `value` could not be ordered against a stored
    /// item. The set is unchanged in that case.
    pub fn try_take(&mut self, value: &T) -> Result<Option<T>, C::Error> {
        Ok(self.map.try_remove_entry(value)?.map(|(k, ())| k))
    }

    /// Returns `true` if the set contains an item equal to `value`.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `value` could not be ordered against a stored
    /// item.
    pub fn try_contains(&self, value: &T) -> Result<bool, C::Error> {
        self.map.try_contains_key(value)
    }

    /// Returns a reference to the stored item equal to `value`, if any.
    ///
    /// # Errors
    ///
    /// Returns the comparator's error if `value` could not be ordered against a stored
    /// item.
    pub fn try_get(&self, value: &T) -> Result<Option<&T>, C::Error> {
        Ok(self.map.try_get_key_value(value)?.map(|(k, ())| k))
    }

    /// Inserts every value of `iter` in turn, as [`try_insert`](Self::try_insert) does.
    ///
    /// # Errors
    ///
    /// Stops at the first value that cannot be ordered and returns the comparator's error.
    /// Values inserted before it stay in the set; the failing value and every value after
    /// it are dropped.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), C::Error> {
        self.map.try_extend(iter.into_iter().map(|value| (value, ())))
    }
}

impl<T: Ord> OSTreeSet<T> {
    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain an equal value, `true` is
    ///   returned.
    /// - If the set already contained an equal value, `false` is returned, and
    ///   the entry is not updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let mut set = OSTreeSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value, ()).is_none()
    }

    /// If the set contains an element equal to the value, removes it from the
    /// set and drops it. Returns whether such an element was present.
    ///
    /// The value may be any borrowed form of the set's element type,
    /// but the ordering on the borrowed form *must* match the
    /// ordering on the element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let mut set = OSTreeSet::new();
    ///
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.remove(value).is_some()
    }

    /// Removes and returns the element in the set, if any, that is equal to
    /// the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let mut set = OSTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.take(&2), Some(2));
    /// assert_eq!(set.take(&2), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.remove_entry(value).map(|(k, ())| k)
    }

    /// Returns `true` if the set contains an element equal to the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let set = OSTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.contains_key(value)
    }

    /// Returns a reference to the element in the set, if any, that is equal to
    /// the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let set = OSTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.get_key_value(value).map(|(k, ())| k)
    }
}

impl<T: Hash, C> Hash for OSTreeSet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.map.hash(state);
    }
}

impl<T: PartialEq, C> PartialEq for OSTreeSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.map.eq(&other.map)
    }
}

impl<T: Eq, C> Eq for OSTreeSet<T, C> {}

impl<T: PartialOrd, C> PartialOrd for OSTreeSet<T, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, C> Ord for OSTreeSet<T, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OSTreeSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Default> Default for OSTreeSet<T, C> {
    fn default() -> Self {
        OSTreeSet { map: OSTreeMap::default() }
    }
}

impl<T: Ord> FromIterator<T> for OSTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = OSTreeSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for OSTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.insert(elem);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for OSTreeSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for OSTreeSet<T> {
    /// Converts a `[T; N]` into an `OSTreeSet<T>`.
    ///
    /// If the array contains any equal values, all but one will be dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let set1 = OSTreeSet::from([1, 2, 3, 4]);
    /// let set2: OSTreeSet<_> = [1, 2, 3, 4].into();
    /// assert_eq!(set1, set2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T, C> IntoIterator for OSTreeSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `OSTreeSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::OSTreeSet;
    ///
    /// let set = OSTreeSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.map.into_keys(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a OSTreeSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.inner).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}
