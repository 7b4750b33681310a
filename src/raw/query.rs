use core::cmp::Ordering;

use log::trace;

use super::handle::Handle;
use super::node::Side;
use super::raw_avl_tree::RawAvlTree;

// Every probe below receives a stored key and returns the ordering of the searched key
// relative to it.

impl<K, V> RawAvlTree<K, V> {
    /// Returns the node holding the key `probe` reports as `Equal`.
    pub(crate) fn find<E>(&self, mut probe: impl FnMut(&K) -> Result<Ordering, E>) -> Result<Option<Handle>, E> {
        let mut current = self.root();
        while let Some(handle) = current {
            let node = self.node(handle);
            current = match probe(&node.key).inspect_err(|_| trace!("find aborted: comparator failed"))? {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Ok(Some(handle)),
            };
        }
        Ok(None)
    }

    /// Returns the node at zero-based position `index` of the ascending order, or `None`
    /// when `index >= len`.
    pub(crate) fn select(&self, index: usize) -> Option<Handle> {
        if index >= self.len() {
            return None;
        }

        let mut current = self.root()?;
        let mut remaining = index;
        loop {
            let node = self.node(current);
            let left_size = self.size(node.left).to_usize();
            current = match remaining.cmp(&left_size) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(current),
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    node.right
                }
            }
            .expect("`select()` - subtree sizes disagree with the tree shape!");
        }
    }

    /// Returns the zero-based position of the key `probe` reports as `Equal`.
    pub(crate) fn rank_of<E>(&self, mut probe: impl FnMut(&K) -> Result<Ordering, E>) -> Result<Option<usize>, E> {
        let mut current = self.root();
        let mut rank = 0;
        while let Some(handle) = current {
            let node = self.node(handle);
            let left_size = self.size(node.left).to_usize();
            current = match probe(&node.key).inspect_err(|_| trace!("rank_of aborted: comparator failed"))? {
                Ordering::Less => node.left,
                Ordering::Equal => return Ok(Some(rank + left_size)),
                Ordering::Greater => {
                    rank += left_size + 1;
                    node.right
                }
            };
        }
        Ok(None)
    }

    /// Returns the node with the greatest key not above the searched key, together with
    /// the number of stored keys not above it.
    pub(crate) fn predecessor_or_equal<E>(
        &self,
        probe: impl FnMut(&K) -> Result<Ordering, E>,
    ) -> Result<(Option<Handle>, usize), E> {
        self.bound_with_count(probe, Side::Left)
    }

    /// Returns the node with the smallest key not below the searched key, together with
    /// the number of stored keys not below it.
    pub(crate) fn successor_or_equal<E>(
        &self,
        probe: impl FnMut(&K) -> Result<Ordering, E>,
    ) -> Result<(Option<Handle>, usize), E> {
        self.bound_with_count(probe, Side::Right)
    }

    /// Shared walk of the two bound queries. `toward` is the side whose keys are counted:
    /// `Left` counts keys `<=` the searched key, `Right` counts keys `>=` it.
    fn bound_with_count<E>(
        &self,
        mut probe: impl FnMut(&K) -> Result<Ordering, E>,
        toward: Side,
    ) -> Result<(Option<Handle>, usize), E> {
        // The ordering that rules out the current node.
        let excluded = match toward {
            Side::Left => Ordering::Less,
            Side::Right => Ordering::Greater,
        };

        let mut best = None;
        let mut count = 0;
        let mut current = self.root();
        while let Some(handle) = current {
            let node = self.node(handle);
            let ordering = probe(&node.key).inspect_err(|_| trace!("bound query aborted: comparator failed"))?;
            if ordering == excluded {
                // Only the keys on the `toward` side of this node can still qualify.
                current = node.child(toward);
                continue;
            }

            best = Some(handle);
            count += self.size(node.child(toward)).to_usize() + 1;
            if ordering == Ordering::Equal {
                break;
            }
            current = match toward {
                Side::Left => node.right,
                Side::Right => node.left,
            };
        }
        Ok((best, count))
    }
}
