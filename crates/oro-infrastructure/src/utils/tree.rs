//! Depth-first tree processing
//!
//! Both traversals call `before` when an item is entered and `after` once all
//! of its children were processed. Children are fully processed before the
//! next sibling is entered.

use std::future::Future;

/// Decision returned by the `before` callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessAction {
    /// Process the children, then call `after`
    Continue,
    /// Skip the children but still call `after` and continue with siblings
    SkipChildren,
    /// Stop the whole traversal; no further callbacks run
    Stop,
}

/// Owned tree with a value per node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    /// Node value
    pub value: T,
    /// Child nodes in order
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    /// Leaf node
    pub fn new(value: T) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    /// Append a child
    pub fn with_child(mut self, child: TreeNode<T>) -> Self {
        self.children.push(child);
        self
    }

    /// Children as an iterator, for use as the `children` callback
    pub fn child_nodes(&self) -> std::slice::Iter<'_, TreeNode<T>> {
        self.children.iter()
    }
}

enum Step<'a, T> {
    Enter(&'a T),
    Exit(&'a T),
}

fn push_children<'a, T, I>(stack: &mut Vec<Step<'a, T>>, children: I)
where
    I: IntoIterator<Item = &'a T>,
{
    let children: Vec<&'a T> = children.into_iter().collect();
    stack.extend(children.into_iter().rev().map(Step::Enter));
}

/// Process `root` and its descendants depth-first
///
/// Returns `false` when the traversal was stopped by either callback.
///
/// # Example
///
/// ```
/// use oro_infrastructure::utils::{ProcessAction, process_tree};
/// use oro_infrastructure::utils::tree::TreeNode;
///
/// let tree = TreeNode::new(1).with_child(TreeNode::new(2)).with_child(TreeNode::new(3));
/// let mut visited = Vec::new();
/// let completed = process_tree(
///     &tree,
///     |node| {
///         visited.push(node.value);
///         ProcessAction::Continue
///     },
///     |_| true,
///     TreeNode::child_nodes,
/// );
/// assert!(completed);
/// assert_eq!(visited, [1, 2, 3]);
/// ```
pub fn process_tree<'a, T, B, A, C, I>(root: &'a T, mut before: B, mut after: A, children: C) -> bool
where
    B: FnMut(&'a T) -> ProcessAction,
    A: FnMut(&'a T) -> bool,
    C: Fn(&'a T) -> I,
    I: IntoIterator<Item = &'a T>,
{
    let mut stack = vec![Step::Enter(root)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(item) => {
                let action = before(item);
                if action == ProcessAction::Stop {
                    return false;
                }
                stack.push(Step::Exit(item));
                if action == ProcessAction::Continue {
                    push_children(&mut stack, children(item));
                }
            }
            Step::Exit(item) => {
                if !after(item) {
                    return false;
                }
            }
        }
    }
    true
}

/// Asynchronous [`process_tree`]; each callback result is awaited in order
pub async fn process_tree_async<'a, T, B, BF, A, AF, C, I>(
    root: &'a T,
    mut before: B,
    mut after: A,
    children: C,
) -> bool
where
    B: FnMut(&'a T) -> BF,
    BF: Future<Output = ProcessAction>,
    A: FnMut(&'a T) -> AF,
    AF: Future<Output = bool>,
    C: Fn(&'a T) -> I,
    I: IntoIterator<Item = &'a T>,
{
    let mut stack = vec![Step::Enter(root)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(item) => {
                let action = before(item).await;
                if action == ProcessAction::Stop {
                    return false;
                }
                stack.push(Step::Exit(item));
                if action == ProcessAction::Continue {
                    push_children(&mut stack, children(item));
                }
            }
            Step::Exit(item) => {
                if !after(item).await {
                    return false;
                }
            }
        }
    }
    true
}
