use std::collections::{HashMap, HashSet};
use std::ops::ControlFlow;

use folio_ui_tree::walk;

use super::model::{MenuItem, MenuItemId, MenuRecord};

/// Build a nested forest from flat parent-pointer records.
///
/// Records whose parent is missing from the set become roots. Every sibling
/// group is ordered by weight. Records caught in a parent cycle can never be
/// reached from a root and are dropped.
pub fn build_forest(records: Vec<MenuRecord>) -> Vec<MenuItem> {
    let known: HashSet<MenuItemId> =
        records.iter().map(|record| record.id.clone()).collect();

    let mut by_parent: HashMap<Option<MenuItemId>, Vec<MenuItem>> =
        HashMap::new();
    for record in records {
        let slot = record
            .parent
            .clone()
            .filter(|parent| known.contains(parent) && *parent != record.id);
        by_parent.entry(slot).or_default().push(MenuItem::from(record));
    }

    let mut roots = by_parent.remove(&None).unwrap_or_default();
    attach_children(&mut roots, &mut by_parent);

    let orphaned: usize = by_parent.values().map(Vec::len).sum();
    if orphaned > 0 {
        log::warn!("dropped {orphaned} menu records caught in a parent cycle");
    }
    roots
}

fn attach_children(
    group: &mut [MenuItem],
    by_parent: &mut HashMap<Option<MenuItemId>, Vec<MenuItem>>,
) {
    group.sort_by_key(|item| item.weight);
    for item in group.iter_mut() {
        if let Some(mut children) = by_parent.remove(&Some(item.id.clone())) {
            attach_children(&mut children, by_parent);
            item.children = children;
        }
    }
}

/// Merge a freshly fetched forest into the local one.
///
/// The static entries form the skeleton. Remote roots sharing a static
/// entry's path are merged onto it first. Then every remaining remote root
/// whose parent is a static entry, by its configured id or by the id of its
/// remote twin, is nested under it; any other remote root is appended.
/// Expanded flags are carried over from `local`, matched by id and then by
/// path. Local nodes absent from the remote data are dropped.
pub fn reconcile(
    local: &[MenuItem],
    remote: Vec<MenuItem>,
    statics: &[MenuItem],
) -> Vec<MenuItem> {
    let flags = ExpansionIndex::from_forest(local);

    let mut merged: Vec<MenuItem> = statics.to_vec();
    let mut owners: HashMap<MenuItemId, usize> = statics
        .iter()
        .enumerate()
        .map(|(index, entry)| (entry.id.clone(), index))
        .collect();

    let mut remote = remote;
    remote.sort_by_key(|item| item.weight);
    let mut pending = Vec::new();
    for item in remote {
        match merged.iter().position(|entry| entry.path == item.path) {
            Some(index) => {
                owners.entry(item.id.clone()).or_insert(index);
                merge_onto_static(&mut merged[index], item);
            },
            None => pending.push(item),
        }
    }

    let mut appended = Vec::new();
    for item in pending {
        let owner = item
            .parent
            .as_ref()
            .and_then(|parent| owners.get(parent))
            .copied();
        match owner {
            Some(index) => merged[index].children.push(item),
            None => appended.push(item),
        }
    }
    merged.extend(appended);

    for item in merged.iter_mut() {
        flags.restore(item);
    }
    merged
}

fn merge_onto_static(slot: &mut MenuItem, remote: MenuItem) {
    let icon = slot.icon_component_name.take();
    let weight = slot.weight;
    let mut children = std::mem::take(&mut slot.children);
    children.extend(remote.children.iter().cloned());

    *slot = remote;
    slot.weight = weight;
    slot.children = children;
    if slot.icon_component_name.is_none() {
        slot.icon_component_name = icon;
    }
}

struct ExpansionIndex {
    by_id: HashMap<MenuItemId, bool>,
    by_path: HashMap<String, bool>,
}

impl ExpansionIndex {
    fn from_forest(items: &[MenuItem]) -> Self {
        let mut index = Self {
            by_id: HashMap::new(),
            by_path: HashMap::new(),
        };
        let _ = walk(items, &mut |item: &MenuItem, _| {
            index.by_id.entry(item.id.clone()).or_insert(item.expanded);
            index.by_path.entry(item.path.clone()).or_insert(item.expanded);
            ControlFlow::<()>::Continue(())
        });
        index
    }

    fn restore(&self, item: &mut MenuItem) {
        item.expanded = self
            .by_id
            .get(&item.id)
            .or_else(|| self.by_path.get(&item.path))
            .copied()
            .unwrap_or(false);
        item.children.sort_by_key(|child| child.weight);
        for child in item.children.iter_mut() {
            self.restore(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::store::find_by_id;
    use crate::menu::store::tests::{branch, item};

    fn record(id: &str, parent: Option<&str>, weight: u32) -> MenuRecord {
        MenuRecord {
            id: MenuItemId::from(id),
            parent: parent.map(MenuItemId::from),
            weight,
            name: id.to_uppercase(),
            title: id.to_uppercase(),
            path: format!("/{id}"),
            icon_component_name: None,
        }
    }

    fn statics() -> Vec<MenuItem> {
        let mut spaces = item("spaces", "/spaces", 1);
        spaces.icon_component_name = Some(String::from("SpacesIcon"));
        vec![spaces, item("settings", "/settings", 2)]
    }

    #[test]
    fn given_flat_records_when_built_then_children_nest_by_weight() {
        let forest = build_forest(vec![
            record("c", Some("a"), 2),
            record("a", None, 1),
            record("b", Some("a"), 1),
        ]);

        assert_eq!(forest.len(), 1);
        let order: Vec<_> = forest[0]
            .children
            .iter()
            .map(|child| child.id.as_str())
            .collect();
        assert_eq!(order, vec!["b", "c"]);
    }

    #[test]
    fn given_unknown_parent_when_built_then_record_becomes_root() {
        let forest = build_forest(vec![
            record("a", Some("spaces"), 2),
            record("b", None, 1),
        ]);

        let roots: Vec<_> =
            forest.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(roots, vec!["b", "a"]);
        assert_eq!(forest[1].parent, Some(MenuItemId::from("spaces")));
    }

    #[test]
    fn given_parent_cycle_when_built_then_cycle_is_dropped() {
        let forest = build_forest(vec![
            record("a", Some("b"), 1),
            record("b", Some("a"), 1),
            record("r", None, 1),
        ]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, MenuItemId::from("r"));
    }

    #[test]
    fn given_expanded_local_node_when_reconciled_then_flag_survives() {
        let local = vec![branch(
            "a",
            "/a",
            3,
            vec![item("b", "/a/b", 1).with_expanded(true)],
        )
        .with_expanded(true)];
        let remote = vec![branch(
            "a",
            "/a",
            3,
            vec![item("b", "/a/b", 1), item("c", "/a/c", 2)],
        )];

        let merged = reconcile(&local, remote, &[]);

        assert!(merged[0].expanded);
        assert!(find_by_id(&merged, &MenuItemId::from("b")).expect("b").expanded);
        assert!(!find_by_id(&merged, &MenuItemId::from("c")).expect("c").expanded);
    }

    #[test]
    fn given_node_missing_remotely_when_reconciled_then_it_is_dropped() {
        let local = vec![branch("a", "/a", 3, vec![item("gone", "/a/g", 1)])];
        let remote = vec![item("a", "/a", 3)];

        let merged = reconcile(&local, remote, &[]);

        assert!(find_by_id(&merged, &MenuItemId::from("gone")).is_none());
    }

    #[test]
    fn given_static_skeleton_when_reconciled_then_remote_nests_under_statics() {
        let local = vec![item("spaces", "/spaces", 1).with_expanded(true)];
        let remote = vec![
            item("p2", "/spaces/p2", 2).with_parent("spaces"),
            item("p1", "/spaces/p1", 1).with_parent("spaces"),
            item("other", "/other", 9),
        ];

        let merged = reconcile(&local, remote, &statics());

        let roots: Vec<_> =
            merged.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(roots, vec!["spaces", "settings", "other"]);
        let pages: Vec<_> = merged[0]
            .children
            .iter()
            .map(|child| child.id.as_str())
            .collect();
        assert_eq!(pages, vec!["p1", "p2"]);
        assert!(merged[0].expanded);
    }

    #[test]
    fn given_remote_root_with_static_path_when_reconciled_then_icon_is_kept() {
        let remote = vec![branch(
            "remote-spaces",
            "/spaces",
            7,
            vec![item("p1", "/spaces/p1", 1)],
        )];

        let merged = reconcile(&[], remote, &statics());

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, MenuItemId::from("remote-spaces"));
        assert_eq!(merged[0].weight, 1);
        assert_eq!(merged[0].icon_component_name.as_deref(), Some("SpacesIcon"));
        assert_eq!(merged[0].children.len(), 1);
    }

    #[test]
    fn given_same_snapshot_when_reconciled_twice_then_forest_is_stable() {
        let local = vec![item("spaces", "/spaces", 1).with_expanded(true)];
        let remote = vec![
            item("p1", "/spaces/p1", 1).with_parent("spaces"),
            item("other", "/other", 9),
        ];

        let once = reconcile(&local, remote.clone(), &statics());
        let twice = reconcile(&once, remote, &statics());

        assert_eq!(once, twice);
    }

    #[test]
    fn given_twin_lighter_than_its_pages_when_reconciled_then_pages_nest() {
        let statics = vec![item("general", "/general", 1)];
        let remote = vec![
            item("g-remote", "/general", 1),
            item("p1", "/general/p1", 2).with_parent("general"),
        ];

        let merged = reconcile(&[], remote, &statics);

        let roots: Vec<_> =
            merged.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(roots, vec!["g-remote"]);
        assert_eq!(merged[0].children.len(), 1);
        assert_eq!(merged[0].children[0].id, MenuItemId::from("p1"));
    }

    #[test]
    fn given_page_pointing_at_twin_id_when_reconciled_then_it_nests() {
        let statics = vec![item("general", "/general", 1)];
        let remote = vec![
            item("p1", "/general/p1", 1).with_parent("g-remote"),
            item("g-remote", "/general", 5),
        ];

        let merged = reconcile(&[], remote, &statics);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].children[0].id, MenuItemId::from("p1"));
    }
}
