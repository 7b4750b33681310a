//! Key comparison strategies.
//!
//! Every collection in this crate orders its keys through a [`Comparator`]. The default,
//! [`NaturalOrder`], uses [`Ord`] and cannot fail. Custom comparators may fail, in which
//! case the `try_*` methods of the collections return the comparator's error and leave the
//! collection unchanged.

use core::cmp::Ordering;
use core::convert::Infallible;
use core::error::Error;
use core::fmt;

/// A total order over keys of type `K` that may fail to produce an ordering.
///
/// Implementations must be consistent: for keys that compare successfully, the relation
/// has to be a strict total order. A comparator that violates this cannot corrupt memory,
/// but lookups may miss keys that are present.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use avl_ostree::compare::Comparator;
///
/// struct ByLength;
///
/// impl Comparator<str> for ByLength {
///     type Error = core::convert::Infallible;
///
///     fn compare(&self, a: &str, b: &str) -> Result<Ordering, Self::Error> {
///         Ok(a.len().cmp(&b.len()))
///     }
/// }
///
/// assert_eq!(ByLength.compare("ab", "c"), Ok(Ordering::Greater));
/// ```
pub trait Comparator<K: ?Sized> {
    /// The error returned when two keys cannot be ordered.
    type Error;

    /// Orders `a` relative to `b`.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the keys cannot be ordered.
    fn compare(&self, a: &K, b: &K) -> Result<Ordering, Self::Error>;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NaturalOrder;

impl<K: ?Sized + Ord> Comparator<K> for NaturalOrder {
    type Error = Infallible;

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Result<Ordering, Infallible> {
        Ok(a.cmp(b))
    }
}

/// Orders keys by their [`PartialOrd`] implementation, failing on incomparable pairs.
///
/// # Examples
///
/// ```
/// use avl_ostree::OSTreeSet;
/// use avl_ostree::compare::{Incomparable, PartialOrder};
///
/// let mut set = OSTreeSet::with_comparator(PartialOrder);
/// assert_eq!(set.try_insert(1.5), Ok(true));
/// assert_eq!(set.try_insert(f64::NAN), Err(Incomparable));
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct PartialOrder;

impl<K: ?Sized + PartialOrd> Comparator<K> for PartialOrder {
    type Error = Incomparable;

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Result<Ordering, Incomparable> {
        a.partial_cmp(b).ok_or(Incomparable)
    }
}

/// Two keys had no defined order under [`PartialOrder`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Incomparable;

impl fmt::Display for Incomparable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("keys are not comparable")
    }
}

impl Error for Incomparable {}

/// Adapts a closure `Fn(&K, &K) -> Result<Ordering, E>` into a [`Comparator`].
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use avl_ostree::OSTreeSet;
/// use avl_ostree::compare::FnComparator;
///
/// // Descending order.
/// let by_reverse = FnComparator(|a: &i32, b: &i32| Ok::<_, ()>(b.cmp(a)));
/// let mut set = OSTreeSet::with_comparator(by_reverse);
/// for value in [1, 3, 2] {
///     set.try_insert(value).unwrap();
/// }
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FnComparator<F>(pub F);

impl<K: ?Sized, E, F> Comparator<K> for FnComparator<F>
where
    F: Fn(&K, &K) -> Result<Ordering, E>,
{
    type Error = E;

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Result<Ordering, E> {
        (self.0)(a, b)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn natural_order_follows_ord() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ok(Ordering::Less));
        assert_eq!(NaturalOrder.compare("b", "a"), Ok(Ordering::Greater));
    }

    #[test]
    fn partial_order_rejects_nan() {
        assert_eq!(PartialOrder.compare(&1.0, &1.0), Ok(Ordering::Equal));
        assert_eq!(PartialOrder.compare(&f64::NAN, &1.0), Err(Incomparable));
        assert_eq!(Incomparable.to_string(), "keys are not comparable");
    }

    #[test]
    fn closure_errors_pass_through() {
        let cmp = FnComparator(|a: &u8, b: &u8| if *a == 0 { Err("zero") } else { Ok(a.cmp(b)) });
        assert_eq!(cmp.compare(&2, &1), Ok(Ordering::Greater));
        assert_eq!(cmp.compare(&0, &1), Err("zero"));
    }
}
