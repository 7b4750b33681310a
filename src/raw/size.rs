use super::handle::{Handle, RawHandle};

/// Number of nodes in a subtree.
///
/// A subtree never holds more nodes than the arena can address, so the count shares the
/// handle's integer width.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub(crate) struct Size(RawHandle);

impl Size {
    pub(crate) const MAX: usize = Handle::LIMIT;
    pub(crate) const ZERO: Self = Self(0);
    pub(crate) const ONE: Self = Self(1);

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(size as RawHandle)
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0 as usize
    }

    /// Size of a node whose children have sizes `left` and `right`.
    #[inline]
    pub(crate) const fn join(left: Self, right: Self) -> Self {
        Self::from_usize(left.to_usize() + right.to_usize() + 1)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(Size, RawHandle);

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` > `Size::MAX`!")]
    fn oversized_count_panics() {
        let _ = Size::from_usize(Size::MAX + 1);
    }

    #[test]
    fn join_counts_the_parent() {
        assert_eq!(Size::join(Size::ZERO, Size::ZERO), Size::ONE);
        assert_eq!(Size::join(Size::from_usize(3), Size::from_usize(4)).to_usize(), 8);
    }

    proptest! {
        #[test]
        fn count_survives_size_conversion(size in 0..=Size::MAX) {
            prop_assert_eq!(Size::from_usize(size).to_usize(), size);
        }
    }
}
