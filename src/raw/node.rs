use super::handle::Handle;
use super::size::Size;

/// A single AVL tree node.
///
/// The node owns its key and value. Children are arena handles; every handle is linked
/// from at most one parent, so the structure is always a tree.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    // 1 + max(height(left), height(right)); an absent child has height 0.
    pub(crate) height: u8,
    // 1 + size(left) + size(right); an absent child has size 0.
    pub(crate) size: Size,
}

/// Which child link of a node a mutation descended through.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl<K, V> Node<K, V> {
    /// Creates a detached leaf node.
    pub(crate) const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            height: 1,
            size: Size::ONE,
        }
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Consumes the node, returning its entry.
    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}
