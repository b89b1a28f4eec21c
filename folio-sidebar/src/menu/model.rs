use std::fmt;

use folio_ui_tree::{TreeNode, TreeNodeMut};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a menu item.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MenuItemId(String);

impl MenuItemId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MenuItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MenuItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Field selector used by key/value lookups over the forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Id,
    Path,
    Parent,
    Name,
    Title,
}

/// A node of the sidebar forest.
///
/// `expanded` is local UI state: it is accepted on input but never
/// serialized, so it cannot leak into a remote payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub path: String,
    #[serde(default)]
    pub parent: Option<MenuItemId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub weight: u32,
    #[serde(default, skip_serializing)]
    pub expanded: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_component_name: Option<String>,
}

impl MenuItem {
    /// Create a leaf with the given identity and no parent.
    pub fn new(
        id: impl Into<MenuItemId>,
        path: impl Into<String>,
        name: impl Into<String>,
        weight: u32,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            path: path.into(),
            parent: None,
            title: name.clone(),
            name,
            weight,
            expanded: false,
            children: Vec::new(),
            icon_component_name: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<MenuItemId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Return whether the item has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Return the value of the selected field, if present.
    pub fn field(&self, key: MenuKey) -> Option<&str> {
        match key {
            MenuKey::Id => Some(self.id.as_str()),
            MenuKey::Path => Some(&self.path),
            MenuKey::Parent => self.parent.as_ref().map(MenuItemId::as_str),
            MenuKey::Name => Some(&self.name),
            MenuKey::Title => Some(&self.title),
        }
    }

    /// Return whether the selected field equals `value`.
    pub fn matches(&self, key: MenuKey, value: &str) -> bool {
        self.field(key) == Some(value)
    }

    /// Shallow-merge every `Some` field of `patch` into this item.
    pub fn apply(&mut self, patch: MenuItemPatch) {
        if let Some(path) = patch.path {
            self.path = path;
        }
        if let Some(parent) = patch.parent {
            self.parent = parent;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(expanded) = patch.expanded {
            self.expanded = expanded;
        }
        if let Some(children) = patch.children {
            self.children = children;
        }
        if let Some(icon) = patch.icon_component_name {
            self.icon_component_name = icon;
        }
    }
}

impl TreeNode for MenuItem {
    fn key(&self) -> &str {
        &self.path
    }

    fn weight(&self) -> u32 {
        self.weight
    }

    fn expanded(&self) -> bool {
        self.expanded
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

impl TreeNodeMut for MenuItem {
    fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }

    fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }
}

/// Partial update merged onto a single item.
///
/// The identifier is deliberately absent: a patch never re-keys a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemPatch {
    pub path: Option<String>,
    pub parent: Option<Option<MenuItemId>>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub weight: Option<u32>,
    pub expanded: Option<bool>,
    pub children: Option<Vec<MenuItem>>,
    pub icon_component_name: Option<Option<String>>,
}

impl MenuItemPatch {
    pub fn expanded(expanded: bool) -> Self {
        Self {
            expanded: Some(expanded),
            ..Self::default()
        }
    }
}

/// Flat, parent-pointer record exchanged with the remote menu store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    pub id: MenuItemId,
    #[serde(default)]
    pub parent: Option<MenuItemId>,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_component_name: Option<String>,
}

impl From<&MenuItem> for MenuRecord {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            parent: item.parent.clone(),
            weight: item.weight,
            name: item.name.clone(),
            title: item.title.clone(),
            path: item.path.clone(),
            icon_component_name: item.icon_component_name.clone(),
        }
    }
}

impl From<MenuRecord> for MenuItem {
    fn from(record: MenuRecord) -> Self {
        Self {
            id: record.id,
            path: record.path,
            parent: record.parent,
            name: record.name,
            title: record.title,
            weight: record.weight,
            expanded: false,
            children: Vec::new(),
            icon_component_name: record.icon_component_name,
        }
    }
}

/// Menu data returned by the remote store, nested or flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuSnapshot {
    Nested(Vec<MenuItem>),
    Flat { items: Vec<MenuRecord> },
}

impl MenuSnapshot {
    /// Convert into a nested forest ordered by weight.
    ///
    /// Both shapes go through the parent pointers, so a bare array of flat
    /// records nests the same way as `{ "items": [...] }`.
    pub fn into_forest(self) -> Vec<MenuItem> {
        super::reconcile::build_forest(self.into_records())
    }

    /// Convert into flat records in preorder.
    pub fn into_records(self) -> Vec<MenuRecord> {
        match self {
            Self::Nested(items) => flatten_records(&items),
            Self::Flat { items } => items,
        }
    }
}

/// Flatten a nested forest into parent-pointer records, preorder.
pub fn flatten_records(items: &[MenuItem]) -> Vec<MenuRecord> {
    let mut records = Vec::new();
    push_records(items, None, &mut records);
    records
}

fn push_records(
    items: &[MenuItem],
    parent: Option<&MenuItemId>,
    records: &mut Vec<MenuRecord>,
) {
    for item in items {
        let mut record = MenuRecord::from(item);
        if record.parent.is_none() {
            record.parent = parent.cloned();
        }
        records.push(record);
        push_records(&item.children, Some(&item.id), records);
    }
}

/// Page returned by the remote "create page" call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPage {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl CreatedPage {
    /// Build the optimistic menu item for this page under `parent`.
    ///
    /// Pages without a server-assigned path are addressed below the parent.
    pub fn to_menu_item(&self, parent: &MenuItem) -> MenuItem {
        let path = self.path.clone().unwrap_or_else(|| {
            format!("{}/{}", parent.path.trim_end_matches('/'), self.id)
        });
        MenuItem {
            id: self.id.clone(),
            path,
            parent: Some(parent.id.clone()),
            name: self.name.clone(),
            title: self.title.clone().unwrap_or_else(|| self.name.clone()),
            weight: 0,
            expanded: false,
            children: Vec::new(),
            icon_component_name: None,
        }
    }
}

/// Block created alongside a new page so it does not open empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDraft {
    pub parent: MenuItemId,
    #[serde(rename = "type")]
    pub kind: String,
    pub schema_version: u32,
    pub properties: serde_json::Value,
}

impl BlockDraft {
    /// Default text widget placed on a freshly created page.
    pub fn text(page: &MenuItemId) -> Self {
        Self {
            parent: page.clone(),
            kind: String::from("text"),
            schema_version: 0,
            properties: serde_json::json!({
                "title": "Text",
                "grid": { "x": 0, "y": 0, "w": 12, "h": 4 },
                "content": "",
            }),
        }
    }
}
