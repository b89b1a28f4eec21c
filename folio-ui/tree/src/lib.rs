//! Tree data helpers shared by folio navigation widgets.
//!
//! This crate is UI-agnostic. It knows nothing about menus, routes or remote
//! stores; it only understands nodes that expose a key, a sibling weight, an
//! expanded flag and an ordered list of children.
//!
//! - model helpers ([`TreeNode`], [`flatten_tree`]) turn a forest into the
//!   visible rows a renderer draws;
//! - traversal helpers ([`walk`], [`walk_mut`], [`find`], [`find_mut`],
//!   [`find_group_mut`]) give depth-first preorder access to a forest.
//!
//! # Quick Example
//!
//! ```
//! use folio_ui_tree::{TreeNode, flatten_tree};
//!
//! struct Node {
//!     key: String,
//!     weight: u32,
//!     expanded: bool,
//!     children: Vec<Node>,
//! }
//!
//! impl TreeNode for Node {
//!     fn key(&self) -> &str {
//!         &self.key
//!     }
//!
//!     fn weight(&self) -> u32 {
//!         self.weight
//!     }
//!
//!     fn expanded(&self) -> bool {
//!         self.expanded
//!     }
//!
//!     fn children(&self) -> &[Self] {
//!         &self.children
//!     }
//! }
//!
//! let nodes = vec![Node {
//!     key: String::from("/docs"),
//!     weight: 1,
//!     expanded: false,
//!     children: vec![Node {
//!         key: String::from("/docs/intro"),
//!         weight: 1,
//!         expanded: false,
//!         children: Vec::new(),
//!     }],
//! }];
//!
//! let rows = flatten_tree(&nodes);
//! assert_eq!(rows.len(), 1);
//! ```

mod model;
mod walk;

pub use model::{FlattenedNode, TreeNode, TreeNodeMut, TreePath, flatten_tree};
pub use walk::{find, find_group_mut, find_mut, walk, walk_mut};
