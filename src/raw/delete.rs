use core::cmp::Ordering;

use log::trace;

use super::handle::Handle;
use super::node::Side;
use super::raw_avl_tree::{Path, PathElement, RawAvlTree};

impl<K, V> RawAvlTree<K, V> {
    /// Removes the entry whose key `probe` reports as `Equal`, returning it.
    ///
    /// `probe(stored)` orders the searched key against a stored one. Comparisons stop once
    /// the target is found; the splice and the rebalancing that follow never call `probe`,
    /// so an `Err` leaves the tree untouched.
    pub(crate) fn delete<E>(
        &mut self,
        mut probe: impl FnMut(&K) -> Result<Ordering, E>,
    ) -> Result<Option<(K, V)>, E> {
        let mut path = Path::new();
        let mut current = self.root();

        let target = loop {
            let Some(handle) = current else {
                return Ok(None);
            };
            let ordering = probe(&self.node(handle).key)
                .inspect_err(|_| trace!("delete aborted: comparator failed at depth {}", path.len()))?;
            let side = match ordering {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => break handle,
            };
            path.push(PathElement { node: handle, side });
            current = self.node(handle).child(side);
        };

        Ok(Some(self.unlink(target, &mut path)))
    }

    /// Removes the smallest entry.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        self.pop_extreme(Side::Left)
    }

    /// Removes the largest entry.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        self.pop_extreme(Side::Right)
    }

    fn pop_extreme(&mut self, side: Side) -> Option<(K, V)> {
        let root = self.root()?;
        let mut path = Path::new();
        let target = self.descend_to_extreme(root, side, &mut path);
        Some(self.unlink(target, &mut path))
    }

    /// Detaches `target`, reached through `path`, and rebalances back up to the root.
    fn unlink(&mut self, target: Handle, path: &mut Path) -> (K, V) {
        let node = self.node(target);
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                // The in-order successor takes the target's place. It has no left child,
                // so its right subtree moves up into the slot it leaves behind.
                let slot = path.len();
                path.push(PathElement {
                    node: target,
                    side: Side::Right,
                });
                let successor = self.descend_to_extreme(right, Side::Left, path);
                let successor_right = self.node(successor).right;
                self.link(path.last().copied(), successor_right);

                let target_node = self.node(target);
                let (left, right) = (target_node.left, target_node.right);
                let successor_node = self.node_mut(successor);
                successor_node.left = left;
                successor_node.right = right;
                path[slot].node = successor;
            }
            (child, None) | (None, child) => self.link(path.last().copied(), child),
        }

        let node = self.node_mut(target);
        node.left = None;
        node.right = None;

        self.retrace(path);
        self.take_detached(target)
    }
}
