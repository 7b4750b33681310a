/// A zero-based rank into the sorted order of a map or set.
///
/// Indexing a collection with a `Rank` returns the element at that position and panics when
/// the rank is not below the collection's length.
///
/// # Examples
///
/// ```
/// use avl_ostree::{OSTreeMap, Rank};
///
/// let mut map = OSTreeMap::new();
/// map.insert("b", 20);
/// map.insert("a", 10);
///
/// assert_eq!(map[Rank(0)], 10);
/// assert_eq!(map[Rank(1)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
