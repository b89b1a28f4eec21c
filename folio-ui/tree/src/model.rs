/// Path of node keys from root to the target row.
///
/// The path is built by concatenating [`TreeNode::key`] values while walking
/// from the root to the current node.
pub type TreePath = Vec<String>;

/// Trait implemented by tree node types consumable by this crate.
pub trait TreeNode: Sized {
    /// Key used to identify the node within its sibling group.
    fn key(&self) -> &str;
    /// Sort order among siblings, ascending.
    fn weight(&self) -> u32;
    /// Whether the node is expanded.
    fn expanded(&self) -> bool;
    /// Ordered children; empty for leaves.
    fn children(&self) -> &[Self];

    /// Whether this node has at least one child.
    fn is_folder(&self) -> bool {
        !self.children().is_empty()
    }
}

/// Mutable access used by in-place traversals.
pub trait TreeNodeMut: TreeNode {
    /// Mutable ordered children.
    fn children_mut(&mut self) -> &mut Vec<Self>;
    /// Set the expanded flag.
    fn set_expanded(&mut self, expanded: bool);
}

/// Flattened representation of a visible tree node.
#[derive(Debug)]
pub struct FlattenedNode<'a, T: TreeNode> {
    /// Zero-based tree depth (`0` for root-level rows).
    pub depth: usize,
    /// Borrowed source node.
    pub node: &'a T,
    /// Key-based path from the root to this row.
    pub path: TreePath,
}

/// Flatten a forest into a depth-first list of visible rows.
///
/// Every level is ordered by ascending [`TreeNode::weight`]. The sort is
/// stable, so equal weights keep their source order.
///
/// Children are included only when `node.is_folder() && node.expanded()`.
pub fn flatten_tree<'a, T: TreeNode>(
    nodes: &'a [T],
) -> Vec<FlattenedNode<'a, T>> {
    let mut rows = Vec::new();
    let mut trail = Vec::new();
    visit_level(nodes, 0, &mut trail, &mut rows);
    rows
}

/// Siblings of one level, lightest first.
fn by_weight<T: TreeNode>(nodes: &[T]) -> Vec<&T> {
    let mut ordered: Vec<&T> = nodes.iter().collect();
    ordered.sort_by_key(|node| node.weight());
    ordered
}

fn visit_level<'a, T: TreeNode>(
    nodes: &'a [T],
    depth: usize,
    trail: &mut TreePath,
    rows: &mut Vec<FlattenedNode<'a, T>>,
) {
    for node in by_weight(nodes) {
        trail.push(node.key().to_owned());
        rows.push(FlattenedNode {
            depth,
            node,
            path: trail.clone(),
        });
        if node.is_folder() && node.expanded() {
            visit_level(node.children(), depth + 1, trail, rows);
        }
        trail.pop();
    }
}
