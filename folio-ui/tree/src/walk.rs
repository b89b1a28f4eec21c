use std::ops::ControlFlow;

use crate::model::{TreeNode, TreeNodeMut};

/// Visit every node of a forest in depth-first preorder.
///
/// The closure receives the node and its depth (`0` for roots). Returning
/// [`ControlFlow::Break`] stops the traversal immediately.
pub fn walk<'a, T, B, F>(nodes: &'a [T], f: &mut F) -> ControlFlow<B>
where
    T: TreeNode,
    F: FnMut(&'a T, usize) -> ControlFlow<B>,
{
    walk_at(nodes, 0, f)
}

fn walk_at<'a, T, B, F>(
    nodes: &'a [T],
    depth: usize,
    f: &mut F,
) -> ControlFlow<B>
where
    T: TreeNode,
    F: FnMut(&'a T, usize) -> ControlFlow<B>,
{
    for node in nodes {
        f(node, depth)?;
        walk_at(node.children(), depth + 1, f)?;
    }
    ControlFlow::Continue(())
}

/// Mutable preorder traversal with early exit.
///
/// The node is visited before its children, so a closure that rewrites the
/// children of the current node sees its own changes on the way down.
pub fn walk_mut<T, B, F>(nodes: &mut [T], f: &mut F) -> ControlFlow<B>
where
    T: TreeNodeMut,
    F: FnMut(&mut T, usize) -> ControlFlow<B>,
{
    walk_mut_at(nodes, 0, f)
}

fn walk_mut_at<T, B, F>(
    nodes: &mut [T],
    depth: usize,
    f: &mut F,
) -> ControlFlow<B>
where
    T: TreeNodeMut,
    F: FnMut(&mut T, usize) -> ControlFlow<B>,
{
    for node in nodes.iter_mut() {
        f(node, depth)?;
        walk_mut_at(node.children_mut(), depth + 1, f)?;
    }
    ControlFlow::Continue(())
}

/// Return the first node in preorder that satisfies `predicate`.
pub fn find<'a, T, P>(nodes: &'a [T], predicate: &P) -> Option<&'a T>
where
    T: TreeNode,
    P: Fn(&T) -> bool,
{
    match walk(nodes, &mut |node, _| {
        if predicate(node) {
            ControlFlow::Break(node)
        } else {
            ControlFlow::Continue(())
        }
    }) {
        ControlFlow::Break(node) => Some(node),
        ControlFlow::Continue(()) => None,
    }
}

/// Mutable counterpart of [`find`].
pub fn find_mut<'a, T, P>(nodes: &'a mut [T], predicate: &P) -> Option<&'a mut T>
where
    T: TreeNodeMut,
    P: Fn(&T) -> bool,
{
    for node in nodes.iter_mut() {
        if predicate(node) {
            return Some(node);
        }
        if let Some(found) = find_mut(node.children_mut(), predicate) {
            return Some(found);
        }
    }
    None
}

/// Locate the sibling group holding the first preorder match.
///
/// Returns the group together with the index of the match inside it, which
/// is what detaching, reordering and neighbour updates need.
pub fn find_group_mut<'a, T, P>(
    nodes: &'a mut Vec<T>,
    predicate: &P,
) -> Option<(&'a mut Vec<T>, usize)>
where
    T: TreeNodeMut,
    P: Fn(&T) -> bool,
{
    if let Some(index) = first_preorder_index(nodes, predicate) {
        return Some((nodes, index));
    }
    for node in nodes.iter_mut() {
        if let Some(found) = find_group_mut(node.children_mut(), predicate) {
            return Some(found);
        }
    }
    None
}

// A direct child only wins when no earlier sibling's subtree holds a match,
// otherwise preorder would be violated.
fn first_preorder_index<T, P>(nodes: &[T], predicate: &P) -> Option<usize>
where
    T: TreeNode,
    P: Fn(&T) -> bool,
{
    for (index, node) in nodes.iter().enumerate() {
        if predicate(node) {
            return Some(index);
        }
        if find(node.children(), predicate).is_some() {
            return None;
        }
    }
    None
}
