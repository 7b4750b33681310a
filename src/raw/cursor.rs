use core::iter::FusedIterator;

use smallvec::SmallVec;

use super::handle::Handle;
use super::raw_avl_tree::RawAvlTree;

/// Ancestors kept inline before the stack spills to the heap.
const STACK_INLINE: usize = 32;

/// In-order walk over a borrowed tree.
///
/// `next` is the node the following [`advance`](Cursor::advance) returns; `stack` holds the
/// ancestors whose right subtrees have not been visited yet, nearest last. The stack grows
/// with the tree height instead of assuming a fixed bound.
pub(crate) struct Cursor<'a, K, V> {
    tree: &'a RawAvlTree<K, V>,
    next: Option<Handle>,
    stack: SmallVec<[Handle; STACK_INLINE]>,
    remaining: usize,
}

impl<K, V> RawAvlTree<K, V> {
    /// Starts an ascending walk at the smallest key.
    pub(crate) fn cursor(&self) -> Cursor<'_, K, V> {
        Cursor::begin(self)
    }
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) fn begin(tree: &'a RawAvlTree<K, V>) -> Self {
        let mut cursor = Self {
            tree,
            next: None,
            stack: SmallVec::new(),
            remaining: tree.len(),
        };
        cursor.next = cursor.descend_left(tree.root());
        cursor
    }

    /// Returns the current node and steps to its in-order successor.
    pub(crate) fn advance(&mut self) -> Option<Handle> {
        let current = self.next?;
        self.next = match self.tree.node(current).right {
            Some(right) => self.descend_left(Some(right)),
            None => self.stack.pop(),
        };
        self.remaining -= 1;
        Some(current)
    }

    /// Number of nodes not yet returned.
    pub(crate) const fn remaining(&self) -> usize {
        self.remaining
    }

    pub(crate) const fn tree(&self) -> &'a RawAvlTree<K, V> {
        self.tree
    }

    /// Walks left from `start`, stacking every node passed, and returns the leftmost node.
    fn descend_left(&mut self, start: Option<Handle>) -> Option<Handle> {
        let mut current = start?;
        while let Some(left) = self.tree.node(current).left {
            self.stack.push(current);
            current = left;
        }
        Some(current)
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            next: self.next,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> Iterator for Cursor<'_, K, V> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        self.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Cursor<'_, K, V> {}

impl<K, V> FusedIterator for Cursor<'_, K, V> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::raw::raw_avl_tree::tests::{natural, tree_of};
    use alloc::vec::Vec;
    use proptest::prelude::*;

    #[test]
    fn empty_tree_cursor_is_exhausted() {
        let tree = tree_of(&[]);
        let mut cursor = tree.cursor();
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn begin_stacks_the_leftmost_chain() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        let cursor = tree.cursor();
        assert_eq!(cursor.stack.len(), 2);
        assert_eq!(cursor.next.map(|h| *tree.entry(h).0), Some(1));
    }

    #[test]
    fn cursor_walks_ascending_then_stops() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        let mut cursor = tree.cursor();
        let mut seen = Vec::new();
        while let Some(handle) = cursor.advance() {
            seen.push(*cursor.tree().entry(handle).0);
            assert_eq!(cursor.remaining(), 7 - seen.len());
        }
        assert_eq!(seen, [1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn cloned_cursor_resumes_independently() {
        let tree = tree_of(&[2, 1, 3]);
        let mut cursor = tree.cursor();
        cursor.advance();
        let rest: Vec<i32> = cursor.clone().map(|h| *tree.entry(h).0).collect();
        assert_eq!(rest, [2, 3]);
        assert_eq!(cursor.len(), 2);
    }

    proptest! {
        #[test]
        fn cursor_yields_every_key_once(keys in prop::collection::vec(any::<i16>(), 0..400)) {
            let mut tree = RawAvlTree::new();
            for &key in &keys {
                let Ok(_) = tree.insert(key, (), natural);
            }
            let mut expected = keys.clone();
            expected.sort_unstable();
            expected.dedup();

            let walked: Vec<i16> = tree.cursor().map(|h| *tree.entry(h).0).collect();
            prop_assert_eq!(walked, expected);
        }
    }
}
