mod arena;
mod cursor;
mod delete;
mod handle;
mod insert;
mod node;
mod query;
mod raw_avl_tree;
mod size;

pub(crate) use cursor::Cursor;
pub(crate) use insert::Insertion;
pub(crate) use node::Side;
pub(crate) use raw_avl_tree::RawAvlTree;
