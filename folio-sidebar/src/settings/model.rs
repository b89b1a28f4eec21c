use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::errors::SettingsError;
use crate::menu::{ExpansionPolicy, MenuItem, MenuItemId};
use crate::widgets::sidebar::SidebarView;

/// Statically configured top-level menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticMenuEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    pub path: String,
    #[serde(default)]
    pub icon_component_name: Option<String>,
}

impl StaticMenuEntry {
    fn new(id: &str, name: &str, path: &str, icon: &str) -> Self {
        Self {
            id: String::from(id),
            name: String::from(name),
            title: None,
            path: String::from(path),
            icon_component_name: Some(String::from(icon)),
        }
    }

    fn to_menu_item(&self, weight: u32) -> MenuItem {
        MenuItem {
            id: MenuItemId::new(self.id.clone()),
            path: self.path.clone(),
            parent: None,
            name: self.name.clone(),
            title: self.title.clone().unwrap_or_else(|| self.name.clone()),
            weight,
            expanded: false,
            children: Vec::new(),
            icon_component_name: self.icon_component_name.clone(),
        }
    }
}

/// Persisted sidebar configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarSettings {
    /// Expansion behaviour of the desktop rail.
    pub rail: ExpansionPolicy,
    /// Expansion behaviour of the mobile drawer.
    pub drawer: ExpansionPolicy,
    /// Top-level entries that exist before any remote data arrives.
    pub static_items: Vec<StaticMenuEntry>,
    /// Name given to pages created from the sidebar.
    pub new_page_name: String,
    /// Static entries whose sub-menu allows the deeper nesting limit.
    pub general_page_names: Vec<String>,
    pub general_max_depth: usize,
    pub default_max_depth: usize,
}

impl Default for SidebarSettings {
    fn default() -> Self {
        Self {
            rail: ExpansionPolicy::single_branch(),
            drawer: ExpansionPolicy::multi_branch(true),
            static_items: vec![
                StaticMenuEntry::new(
                    "general",
                    "General",
                    "/general",
                    "GeneralIcon",
                ),
                StaticMenuEntry::new(
                    "dashboards",
                    "Dashboards",
                    "/dashboards",
                    "DashboardsIcon",
                ),
                StaticMenuEntry::new(
                    "settings",
                    "Settings",
                    "/settings",
                    "SettingsIcon",
                ),
            ],
            new_page_name: String::from("New page"),
            general_page_names: vec![String::from("General")],
            general_max_depth: 4,
            default_max_depth: 1,
        }
    }
}

impl SidebarSettings {
    /// Return the expansion policy of the given presentation.
    pub fn policy(&self, view: SidebarView) -> ExpansionPolicy {
        match view {
            SidebarView::Rail => self.rail,
            SidebarView::Drawer => self.drawer,
        }
    }

    /// Build the static skeleton weighted in configuration order.
    pub fn static_menu_items(&self) -> Vec<MenuItem> {
        self.static_items
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.to_menu_item(index as u32 + 1))
            .collect()
    }

    /// Return the sub-menu nesting limit for a top-level item.
    pub fn max_depth_for(&self, item: &MenuItem) -> usize {
        if self.general_page_names.iter().any(|name| *name == item.name) {
            self.general_max_depth
        } else {
            self.default_max_depth
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.new_page_name.trim().is_empty() {
            return Err(SettingsError::Validation {
                message: String::from("new_page_name must not be empty"),
            });
        }
        if self.general_max_depth == 0 || self.default_max_depth == 0 {
            return Err(SettingsError::Validation {
                message: String::from("max depth must be at least 1"),
            });
        }

        let mut ids = HashSet::new();
        let mut paths = HashSet::new();
        for entry in &self.static_items {
            if !entry.path.starts_with('/') {
                return Err(SettingsError::Validation {
                    message: format!(
                        "static item path {} must start with '/'",
                        entry.path
                    ),
                });
            }
            if !ids.insert(entry.id.as_str()) {
                return Err(SettingsError::Validation {
                    message: format!("duplicate static item id {}", entry.id),
                });
            }
            if !paths.insert(entry.path.as_str()) {
                return Err(SettingsError::Validation {
                    message: format!(
                        "duplicate static item path {}",
                        entry.path
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::ExpansionMode;

    #[test]
    fn given_default_settings_when_validated_then_they_pass() {
        assert!(SidebarSettings::default().validate().is_ok());
    }

    #[test]
    fn given_default_settings_when_policies_read_then_views_differ() {
        let settings = SidebarSettings::default();
        assert_eq!(
            settings.policy(SidebarView::Rail).mode,
            ExpansionMode::SingleBranch
        );
        let drawer = settings.policy(SidebarView::Drawer);
        assert_eq!(drawer.mode, ExpansionMode::MultiBranch);
        assert!(drawer.reset_on_sync);
    }

    #[test]
    fn given_partial_json_when_deserialized_then_missing_fields_use_defaults() {
        let json = serde_json::json!({
            "new_page_name": "Untitled",
            "rail": { "mode": "multi_branch" }
        });

        let settings: SidebarSettings =
            serde_json::from_value(json).expect("should deserialize");
        assert_eq!(settings.new_page_name, "Untitled");
        assert_eq!(settings.rail.mode, ExpansionMode::MultiBranch);
        assert!(!settings.rail.reset_on_sync);
        assert_eq!(settings.static_items.len(), 3);
    }

    #[test]
    fn given_duplicate_static_paths_when_validated_then_error_is_returned() {
        let mut settings = SidebarSettings::default();
        settings.static_items[1].path = settings.static_items[0].path.clone();

        let error = settings.validate().expect_err("should fail");
        assert!(matches!(error, SettingsError::Validation { .. }));
    }

    #[test]
    fn given_static_entries_when_built_then_weights_follow_order() {
        let items = SidebarSettings::default().static_menu_items();
        let weights: Vec<_> = items.iter().map(|item| item.weight).collect();
        assert_eq!(weights, vec![1, 2, 3]);
        assert_eq!(items[0].title, "General");
    }

    #[test]
    fn given_general_item_when_depth_requested_then_general_limit_applies() {
        let settings = SidebarSettings::default();
        let items = settings.static_menu_items();
        assert_eq!(settings.max_depth_for(&items[0]), 4);
        assert_eq!(settings.max_depth_for(&items[1]), 1);
    }
}
