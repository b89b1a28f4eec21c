use std::collections::HashMap;

use folio_ui_tree::find_group_mut;
use thiserror::Error;

use super::model::{MenuItem, MenuItemId, MenuRecord};
use super::store::{find_by_id, find_by_id_mut, find_parent, renumber};

/// Drag-and-drop result delivered by the tree surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub node: MenuItemId,
    /// Target parent. `None` means the top level of the current sub-menu.
    pub destination_parent: Option<MenuItemId>,
    pub destination_index: usize,
}

/// Local effect of a move and the records to persist remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub records: Vec<MenuRecord>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("menu item {0} not found")]
    NodeNotFound(MenuItemId),
    #[error("destination parent {0} not found")]
    DestinationNotFound(MenuItemId),
    #[error("menu item {0} cannot be moved into its own subtree")]
    IntoOwnSubtree(MenuItemId),
    #[error("no current menu item to anchor a top-level move")]
    NoCurrentItem,
}

/// Reposition a node inside the forest.
///
/// The destination group is renumbered `1..=n` and every member gets the
/// destination as parent. The source group is renumbered as well when the
/// node left it. Paths are never rewritten.
///
/// The returned records hold, in order: the destination parent (only when
/// one was given), the destination children in their new order, then the
/// source siblings whose weight changed.
pub fn move_node(
    items: &mut Vec<MenuItem>,
    current: Option<&MenuItemId>,
    request: &MoveRequest,
) -> Result<MoveOutcome, MoveError> {
    let anchor_id = resolve_anchor(items, current, request)?;

    let node = find_by_id(items, &request.node)
        .ok_or_else(|| MoveError::NodeNotFound(request.node.clone()))?;
    if node.id == anchor_id || find_by_id(&node.children, &anchor_id).is_some()
    {
        return Err(MoveError::IntoOwnSubtree(request.node.clone()));
    }

    let source_parent = find_parent(items, &request.node).map(|p| p.id.clone());
    let leaves_group = source_parent.as_ref() != Some(&anchor_id);

    let (moved, source_records) = detach(items, &request.node, source_parent)?;

    let anchor = find_by_id_mut(items, &anchor_id)
        .ok_or_else(|| MoveError::DestinationNotFound(anchor_id.clone()))?;
    let index = request.destination_index.min(anchor.children.len());
    anchor.children.insert(index, moved);
    renumber(&mut anchor.children);
    for child in anchor.children.iter_mut() {
        child.parent = Some(anchor_id.clone());
    }

    let mut records = Vec::with_capacity(anchor.children.len() + 1);
    if request.destination_parent.is_some() {
        records.push(MenuRecord::from(&*anchor));
    }
    records.extend(anchor.children.iter().map(MenuRecord::from));
    if leaves_group {
        records.extend(source_records);
    }

    log::debug!(
        "moved menu item {} under {anchor_id} at {index}",
        request.node
    );
    Ok(MoveOutcome { records })
}

fn resolve_anchor(
    items: &[MenuItem],
    current: Option<&MenuItemId>,
    request: &MoveRequest,
) -> Result<MenuItemId, MoveError> {
    match &request.destination_parent {
        Some(parent) => find_by_id(items, parent)
            .map(|item| item.id.clone())
            .ok_or_else(|| MoveError::DestinationNotFound(parent.clone())),
        None => current
            .and_then(|id| find_by_id(items, id))
            .map(|item| item.id.clone())
            .ok_or(MoveError::NoCurrentItem),
    }
}

// Removes the node from its group and renumbers the remaining siblings.
// Records are produced only for siblings that live under a parent node.
fn detach(
    items: &mut Vec<MenuItem>,
    id: &MenuItemId,
    source_parent: Option<MenuItemId>,
) -> Result<(MenuItem, Vec<MenuRecord>), MoveError> {
    let (group, index) =
        find_group_mut(items, &|item: &MenuItem| item.id == *id)
            .ok_or_else(|| MoveError::NodeNotFound(id.clone()))?;

    let moved = group.remove(index);
    let before: HashMap<MenuItemId, u32> = group
        .iter()
        .map(|item| (item.id.clone(), item.weight))
        .collect();
    renumber(group);

    if source_parent.is_none() {
        return Ok((moved, Vec::new()));
    }
    let changed = group
        .iter()
        .filter(|item| before.get(&item.id) != Some(&item.weight))
        .map(MenuRecord::from)
        .collect();
    Ok((moved, changed))
}
