use std::ops::ControlFlow;

use folio_ui_tree::{find, find_group_mut, find_mut, walk, walk_mut};

use super::model::{MenuItem, MenuItemId, MenuItemPatch, MenuKey};

/// Return the first node in preorder whose `key` field equals `value`.
pub fn find_by_key<'a>(
    items: &'a [MenuItem],
    key: MenuKey,
    value: &str,
) -> Option<&'a MenuItem> {
    find(items, &|item: &MenuItem| item.matches(key, value))
}

pub fn find_by_key_mut<'a>(
    items: &'a mut [MenuItem],
    key: MenuKey,
    value: &str,
) -> Option<&'a mut MenuItem> {
    find_mut(items, &|item: &MenuItem| item.matches(key, value))
}

pub fn find_by_id<'a>(
    items: &'a [MenuItem],
    id: &MenuItemId,
) -> Option<&'a MenuItem> {
    find_by_key(items, MenuKey::Id, id.as_str())
}

pub fn find_by_id_mut<'a>(
    items: &'a mut [MenuItem],
    id: &MenuItemId,
) -> Option<&'a mut MenuItem> {
    find_by_key_mut(items, MenuKey::Id, id.as_str())
}

/// Return the node whose children contain `id`, or `None` for roots.
pub fn find_parent<'a>(
    items: &'a [MenuItem],
    id: &MenuItemId,
) -> Option<&'a MenuItem> {
    find(items, &|item: &MenuItem| {
        item.children.iter().any(|child| child.id == *id)
    })
}

/// Merge `patch` into the first node matching `key == value`.
///
/// Returns `false` and leaves the forest untouched when nothing matches.
pub fn update_by_key_value(
    items: &mut [MenuItem],
    patch: MenuItemPatch,
    key: MenuKey,
    value: &str,
) -> bool {
    match find_by_key_mut(items, key, value) {
        Some(item) => {
            item.apply(patch);
            true
        },
        None => {
            log::debug!("menu item with {key:?} = {value} not found");
            false
        },
    }
}

/// Flip the expanded flag of the node with `id`.
pub fn toggle_expanded(items: &mut [MenuItem], id: &MenuItemId) -> bool {
    match find_by_id_mut(items, id) {
        Some(item) => {
            item.expanded = !item.expanded;
            true
        },
        None => false,
    }
}

/// Set `expanded = false` on every node of the forest.
pub fn collapse_all_expanded(items: &mut [MenuItem]) {
    let _ = walk_mut(items, &mut |item: &mut MenuItem, _| {
        item.expanded = false;
        ControlFlow::<()>::Continue(())
    });
}

/// Collapse the direct children of the first node matching `key == value`.
///
/// The node itself and deeper descendants keep their flags.
pub fn collapse_parent_children_by_key_value(
    items: &mut [MenuItem],
    key: MenuKey,
    value: &str,
) -> bool {
    match find_by_key_mut(items, key, value) {
        Some(parent) => {
            for child in parent.children.iter_mut() {
                child.expanded = false;
            }
            true
        },
        None => false,
    }
}

/// Collapse every sibling of the node with `id`. For a root, the other
/// roots are its siblings. Descendants of the siblings keep their flags.
pub fn collapse_all_neighbors(
    items: &mut Vec<MenuItem>,
    id: &MenuItemId,
) -> bool {
    let Some((group, index)) =
        find_group_mut(items, &|item: &MenuItem| item.id == *id)
    else {
        return false;
    };

    for (position, sibling) in group.iter_mut().enumerate() {
        if position != index {
            sibling.expanded = false;
        }
    }
    true
}

/// Append `item` as the last child of the node with `parent_id`.
///
/// The new child is weighted one above the heaviest existing sibling,
/// saturating at `u32::MAX`. Its parent pointer is set to `parent_id`.
pub fn insert_sub_menu_item(
    items: &mut [MenuItem],
    parent_id: &MenuItemId,
    mut item: MenuItem,
) -> bool {
    let Some(parent) = find_by_id_mut(items, parent_id) else {
        log::warn!("cannot insert {} under missing item {parent_id}", item.id);
        return false;
    };

    item.weight = parent
        .children
        .iter()
        .map(|child| child.weight)
        .max()
        .map_or(1, |max| max.saturating_add(1));
    item.parent = Some(parent_id.clone());
    parent.children.push(item);
    true
}

/// Assign weights `1..=n` to a sibling group in its current order.
pub fn renumber(group: &mut [MenuItem]) {
    for (index, item) in group.iter_mut().enumerate() {
        item.weight = index as u32 + 1;
    }
}

/// Return whether any node of the forest is expanded.
pub fn has_expanded_item(items: &[MenuItem]) -> bool {
    walk(items, &mut |item: &MenuItem, _| {
        if item.expanded {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .is_break()
}
