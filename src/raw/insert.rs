use core::cmp::Ordering;

use log::trace;

use super::handle::Handle;
use super::node::Side;
use super::raw_avl_tree::{Path, PathElement, RawAvlTree};

/// Result of an insertion that did not fail on comparison.
#[derive(Debug)]
pub(crate) enum Insertion<V> {
    /// A new node was created and linked.
    Inserted,
    /// An equal key is already stored at `existing`; the tree is unchanged, the new key is
    /// dropped and its value is handed back.
    AlreadyPresent { existing: Handle, value: V },
}

impl<K, V> RawAvlTree<K, V> {
    /// Inserts `key` with `value` unless an equal key is present.
    ///
    /// `compare(new, stored)` orders the new key against a stored one. Every comparison
    /// happens during the descent, before anything is linked, so an `Err` leaves the tree
    /// untouched.
    pub(crate) fn insert<E>(
        &mut self,
        key: K,
        value: V,
        mut compare: impl FnMut(&K, &K) -> Result<Ordering, E>,
    ) -> Result<Insertion<V>, E> {
        let mut path = Path::new();
        let mut current = self.root();

        while let Some(handle) = current {
            let ordering = compare(&key, &self.node(handle).key)
                .inspect_err(|_| trace!("insert aborted: comparator failed at depth {}", path.len()))?;
            let side = match ordering {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    return Ok(Insertion::AlreadyPresent { existing: handle, value });
                }
            };
            path.push(PathElement { node: handle, side });
            current = self.node(handle).child(side);
        }

        let handle = self.create(key, value);
        self.link(path.last().copied(), Some(handle));
        self.retrace(&path);
        Ok(Insertion::Inserted)
    }
}
