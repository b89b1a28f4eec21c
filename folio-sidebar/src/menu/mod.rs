//! Menu tree state engine: the forest, its lookups and the operations that
//! keep it consistent with the route, drag-and-drop and remote refreshes.

pub mod expansion;
pub mod model;
pub mod mutator;
pub mod reconcile;
pub mod store;

pub use expansion::{
    ActiveChain, ExpansionMode, ExpansionPolicy, expand_tree, is_route_ancestor,
};
pub use model::{
    BlockDraft, CreatedPage, MenuItem, MenuItemId, MenuItemPatch, MenuKey,
    MenuRecord, MenuSnapshot, flatten_records,
};
pub use mutator::{MoveError, MoveOutcome, MoveRequest, move_node};
pub use reconcile::{build_forest, reconcile};
