use core::num::NonZero;

// Narrow handles under test so the capacity checks are reachable.
#[cfg(test)]
pub(crate) type RawHandle = u16;
#[cfg(not(test))]
pub(crate) type RawHandle = u32;

/// Position of a node in the tree's arena.
///
/// The slot index is stored plus one in a `NonZero`, which lets an absent child
/// (`Option<Handle>`) share the handle's width.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Number of distinct slots a handle can address.
    pub(crate) const LIMIT: usize = (RawHandle::MAX - 1) as usize;

    /// Returns the handle of slot `index`, or `None` once `index` reaches [`Handle::LIMIT`].
    #[inline]
    pub(crate) fn new(index: usize) -> Option<Self> {
        if index >= Self::LIMIT {
            return None;
        }
        let raw = RawHandle::try_from(index + 1).ok()?;
        NonZero::new(raw).map(Self)
    }

    /// Slot index in the arena.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
