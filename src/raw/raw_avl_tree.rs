use alloc::vec::Vec;

use log::trace;
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};
use super::size::Size;

/// Inline depth of a mutation path. AVL height is below 1.45 log2(n), so this covers every
/// tree a `u32` handle can address without spilling. Must be an array length `smallvec`
/// implements `Array` for.
const PATH_INLINE: usize = 64;

/// The AVL engine backing `OSTreeMap` and `OSTreeSet`.
///
/// The tree owns every node through its arena and tracks only the root handle. Each
/// mutation records the path it descended, changes the links at the bottom and then
/// retraces the path, recomputing `height`/`size` and rotating where a node went out of
/// balance.
#[derive(Clone)]
pub(crate) struct RawAvlTree<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

/// One step of a descent: the node visited and the child link taken from it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PathElement {
    pub(crate) node: Handle,
    pub(crate) side: Side,
}

/// Ancestors of the node being changed, root first.
pub(crate) type Path = SmallVec<[PathElement; PATH_INLINE]>;

impl<K, V> RawAvlTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates an empty tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of entries in the tree.
    pub(crate) fn len(&self) -> usize {
        self.size(self.root).to_usize()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Returns the key and value stored at `handle`.
    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.nodes.get(handle);
        (&node.key, &node.value)
    }

    /// Returns the key and a mutable reference to the value stored at `handle`.
    pub(crate) fn entry_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        let node = self.nodes.get_mut(handle);
        (&node.key, &mut node.value)
    }

    /// Allocates a detached leaf holding `key` and `value`.
    pub(crate) fn create(&mut self, key: K, value: V) -> Handle {
        self.nodes.alloc(Node::new(key, value))
    }

    /// Releases every node of `subtree`, children before parents.
    ///
    /// The caller must already have unlinked `subtree` from its parent.
    pub(crate) fn destroy(&mut self, subtree: Option<Handle>) {
        let Some(handle) = subtree else {
            return;
        };
        let node = self.nodes.get(handle);
        let (left, right) = (node.left, node.right);
        self.destroy(left);
        self.destroy(right);
        self.nodes.free(handle);
    }

    /// Removes every entry, keeping the allocated capacity.
    pub(crate) fn clear(&mut self) {
        let len = self.nodes.len();
        let root = self.root.take();
        self.destroy(root);
        self.nodes.clear();
        trace!("cleared tree of {len} entries");
    }

    /// Consumes the tree, returning its entries in ascending key order.
    pub(crate) fn into_entries(mut self) -> Vec<(K, V)> {
        let order: Vec<Handle> = self.cursor().collect();
        self.root = None;
        order.into_iter().map(|handle| self.take_detached(handle)).collect()
    }

    /// Frees the slot of a node that is no longer linked into the tree, returning its entry.
    pub(crate) fn take_detached(&mut self, handle: Handle) -> (K, V) {
        self.nodes.take(handle).into_entry()
    }

    /// Handle of the leftmost (`Side::Left`) or rightmost (`Side::Right`) node.
    pub(crate) fn extreme(&self, side: Side) -> Option<Handle> {
        let mut current = self.root?;
        while let Some(next) = self.node(current).child(side) {
            current = next;
        }
        Some(current)
    }

    /// Follows `side` links from `start`, recording each step, and returns the last node
    /// reached.
    pub(crate) fn descend_to_extreme(&self, start: Handle, side: Side, path: &mut Path) -> Handle {
        let mut current = start;
        while let Some(next) = self.node(current).child(side) {
            path.push(PathElement { node: current, side });
            current = next;
        }
        current
    }

    // ─── Metadata ───────────────────────────────────────────────────────────────

    #[inline]
    pub(crate) fn height(&self, subtree: Option<Handle>) -> u8 {
        subtree.map_or(0, |handle| self.node(handle).height)
    }

    #[inline]
    pub(crate) fn size(&self, subtree: Option<Handle>) -> Size {
        subtree.map_or(Size::ZERO, |handle| self.node(handle).size)
    }

    /// `height(left) - height(right)` of the node at `handle`.
    #[inline]
    pub(crate) fn balance(&self, handle: Handle) -> i16 {
        let node = self.node(handle);
        i16::from(self.height(node.left)) - i16::from(self.height(node.right))
    }

    /// Recomputes `height` and `size` of `handle` from its children.
    fn update(&mut self, handle: Handle) {
        let node = self.node(handle);
        let height = self.height(node.left).max(self.height(node.right)) + 1;
        let size = Size::join(self.size(node.left), self.size(node.right));
        let node = self.node_mut(handle);
        node.height = height;
        node.size = size;
    }

    // ─── Rotations ──────────────────────────────────────────────────────────────
    //
    //       y                               x
    //      / \      rotate_right(y)        / \
    //     x   c    - - - - - - - - >      a   y
    //    / \       < - - - - - - - -         / \
    //   a   b       rotate_left(x)          b   c

    /// Promotes the left child of `y`; returns the new subtree root.
    pub(crate) fn rotate_right(&mut self, y: Handle) -> Handle {
        let x = self.node(y).left.expect("`rotate_right()` - node has no left child!");
        let b = self.node(x).right;
        self.node_mut(x).right = Some(y);
        self.node_mut(y).left = b;
        self.update(y);
        self.update(x);
        x
    }

    /// Promotes the right child of `x`; returns the new subtree root.
    pub(crate) fn rotate_left(&mut self, x: Handle) -> Handle {
        let y = self.node(x).right.expect("`rotate_left()` - node has no right child!");
        let b = self.node(y).left;
        self.node_mut(y).left = Some(x);
        self.node_mut(x).right = b;
        self.update(x);
        self.update(y);
        y
    }

    /// Refreshes the metadata of `handle` and restores its balance; returns the handle now
    /// rooting the subtree.
    ///
    /// The rotation is chosen from the heavy child's own balance. After an insertion the
    /// heavy child always leans towards the new key, so this picks the same rotation as
    /// comparing the new key with the child's key would.
    pub(crate) fn rebalance(&mut self, handle: Handle) -> Handle {
        self.update(handle);
        match self.balance(handle) {
            2.. => {
                let left = self.node(handle).left.expect("left-heavy node has a left child");
                if self.balance(left) < 0 {
                    let left = self.rotate_left(left);
                    self.node_mut(handle).left = Some(left);
                }
                self.rotate_right(handle)
            }
            ..=-2 => {
                let right = self.node(handle).right.expect("right-heavy node has a right child");
                if self.balance(right) > 0 {
                    let right = self.rotate_right(right);
                    self.node_mut(handle).right = Some(right);
                }
                self.rotate_left(handle)
            }
            _ => handle,
        }
    }

    // ─── Path surgery ───────────────────────────────────────────────────────────

    /// Points the link described by `parent` (or the root when `None`) at `child`.
    pub(crate) fn link(&mut self, parent: Option<PathElement>, child: Option<Handle>) {
        match parent {
            Some(PathElement { node, side }) => self.node_mut(node).set_child(side, child),
            None => self.root = child,
        }
    }

    /// Rebalances every node on `path`, deepest first, relinking each resulting subtree
    /// root into its parent.
    pub(crate) fn retrace(&mut self, path: &[PathElement]) {
        for (depth, element) in path.iter().enumerate().rev() {
            let subtree = self.rebalance(element.node);
            let parent = depth.checked_sub(1).map(|above| path[above]);
            self.link(parent, Some(subtree));
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
pub(crate) mod tests {
    use super::*;
    use crate::raw::Insertion;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::cmp::Ordering;
    use core::convert::Infallible;
    use proptest::prelude::*;

    pub(crate) fn natural<K: Ord>(a: &K, b: &K) -> Result<Ordering, Infallible> {
        Ok(a.cmp(b))
    }

    pub(crate) fn tree_of(keys: &[i32]) -> RawAvlTree<i32, i32> {
        let mut tree = RawAvlTree::new();
        for &key in keys {
            let Ok(_) = tree.insert(key, key * 10, natural);
        }
        tree
    }

    pub(crate) fn keys_of(tree: &RawAvlTree<i32, i32>) -> Vec<i32> {
        tree.cursor().map(|handle| *tree.entry(handle).0).collect()
    }

    impl<K: Ord, V> RawAvlTree<K, V> {
        /// Checks ordering, balance, height and size at every node. Panics with every
        /// violation found.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();
            let counted = self.validate_node(self.root, None, None, &mut errors);
            if counted != self.nodes.len() {
                errors.push(format!("reachable nodes={counted}, live arena slots={}", self.nodes.len()));
            }
            assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
        }

        fn validate_node(
            &self,
            subtree: Option<Handle>,
            lower: Option<&K>,
            upper: Option<&K>,
            errors: &mut Vec<String>,
        ) -> usize {
            let Some(handle) = subtree else {
                return 0;
            };
            let node = self.node(handle);
            if lower.is_some_and(|lower| node.key <= *lower) || upper.is_some_and(|upper| node.key >= *upper) {
                errors.push(format!("{handle:?}: key out of order"));
            }
            let left = self.validate_node(node.left, lower, Some(&node.key), errors);
            let right = self.validate_node(node.right, Some(&node.key), upper, errors);

            let expected_height = self.height(node.left).max(self.height(node.right)) + 1;
            if node.height != expected_height {
                errors.push(format!("{handle:?}: height={} expected={expected_height}", node.height));
            }
            if node.size.to_usize() != left + right + 1 {
                errors.push(format!("{handle:?}: size={} expected={}", node.size.to_usize(), left + right + 1));
            }
            if self.balance(handle).abs() > 1 {
                errors.push(format!("{handle:?}: balance={}", self.balance(handle)));
            }
            left + right + 1
        }
    }

    #[test]
    fn empty_tree() {
        let tree: RawAvlTree<i32, i32> = RawAvlTree::new();
        tree.validate_invariants();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert!(tree.extreme(Side::Left).is_none());
    }

    #[test]
    fn rotations_preserve_order_and_metadata() {
        let mut tree = RawAvlTree::new();
        let a = tree.create(1, ());
        let x = tree.create(2, ());
        let y = tree.create(3, ());
        tree.node_mut(x).left = Some(a);
        tree.node_mut(y).left = Some(x);
        tree.update(x);
        tree.update(y);

        let root = tree.rotate_right(y);
        assert_eq!(root, x);
        assert_eq!(tree.node(x).right, Some(y));
        assert_eq!((tree.node(x).height, tree.node(x).size.to_usize()), (2, 3));
        assert_eq!((tree.node(y).height, tree.node(y).size.to_usize()), (1, 1));

        let root = tree.rotate_left(x);
        assert_eq!(root, y);
        assert_eq!(tree.node(y).left, Some(x));
        assert_eq!(tree.node(x).left, Some(a));
        assert_eq!((tree.node(y).height, tree.node(y).size.to_usize()), (3, 3));
    }

    #[test]
    fn sequential_insertions_stay_balanced() {
        let keys: Vec<i32> = (0..1000).collect();
        let tree = tree_of(&keys);
        tree.validate_invariants();
        assert_eq!(tree.len(), 1000);
        // 1000 nodes fit in a perfectly balanced tree of height 10; AVL allows 1.44x.
        assert!(tree.height(tree.root()) <= 14);
        assert_eq!(keys_of(&tree), keys);
    }

    #[test]
    fn mutation_path_grows_past_its_inline_depth() {
        let handle = Handle::new(0).expect("slot 0 is addressable");
        let mut path = Path::new();
        for _ in 0..PATH_INLINE {
            path.push(PathElement { node: handle, side: Side::Left });
        }
        assert!(!path.spilled());

        path.push(PathElement { node: handle, side: Side::Right });
        assert!(path.spilled());
        assert_eq!(path.len(), PATH_INLINE + 1);
        assert!(matches!(path.last(), Some(PathElement { side: Side::Right, .. })));
    }

    #[test]
    fn long_insert_run_keeps_a_shallow_path() {
        let mut tree = RawAvlTree::new();
        for key in 0..4_096 {
            let Ok(Insertion::Inserted) = tree.insert(key, key, natural) else {
                panic!("insert of {key} failed");
            };
        }
        tree.validate_invariants();
        assert!(usize::from(tree.height(tree.root())) <= PATH_INLINE);
        let Ok(removed) = tree.delete(|k| natural(&2_048, k));
        assert_eq!(removed, Some((2_048, 2_048)));
    }

    #[test]
    fn clear_releases_every_node() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        tree.clear();
        tree.validate_invariants();
        assert!(tree.is_empty());

        let Ok(Insertion::Inserted) = tree.insert(2, 20, natural) else {
            panic!("insert into cleared tree failed");
        };
        assert_eq!(keys_of(&tree), [2]);
    }

    #[test]
    fn destroy_frees_a_detached_subtree() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        let root = tree.root().expect("non-empty");
        let left = tree.node(root).left;
        tree.node_mut(root).left = None;
        tree.destroy(left);
        assert_eq!(tree.nodes.len(), 4);
    }

    #[test]
    fn into_entries_is_sorted() {
        let tree = tree_of(&[9, 2, 7, 4]);
        assert_eq!(tree.into_entries(), [(2, 20), (4, 40), (7, 70), (9, 90)]);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Delete(i32),
        PopFirst,
        PopLast,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0i32..1000).prop_map(Op::Insert),
            3 => (0i32..1000).prop_map(Op::Delete),
            1 => Just(Op::PopFirst),
            1 => Just(Op::PopLast),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn invariants_hold_after_every_operation(ops in prop::collection::vec(op_strategy(), 0..500)) {
            let mut tree: RawAvlTree<i32, i32> = RawAvlTree::new();
            let mut model = alloc::collections::BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        let Ok(outcome) = tree.insert(key, key, natural);
                        let inserted = matches!(outcome, Insertion::Inserted);
                        prop_assert_eq!(inserted, model.insert(key, key).is_none());
                    }
                    Op::Delete(key) => {
                        let Ok(removed) = tree.delete(|k| natural(&key, k));
                        prop_assert_eq!(removed, model.remove_entry(&key));
                    }
                    Op::PopFirst => prop_assert_eq!(tree.pop_first(), model.pop_first()),
                    Op::PopLast => prop_assert_eq!(tree.pop_last(), model.pop_last()),
                }
                tree.validate_invariants();
                prop_assert_eq!(tree.len(), model.len());
            }
            prop_assert_eq!(keys_of(&tree), model.keys().copied().collect::<Vec<_>>());
        }
    }
}
