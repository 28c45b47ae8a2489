//! Small shared helpers

pub mod tree;

pub use tree::{ProcessAction, TreeNode, process_tree, process_tree_async};
