use folio_ui_tree::FlattenedNode;

use crate::menu::MenuItem;

/// Presentation the sidebar is rendered as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SidebarView {
    /// Desktop rail with a flyout sub-menu.
    #[default]
    Rail,
    /// Mobile drawer that drills down one level at a time.
    Drawer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// User-facing toast emitted by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// Whether the toast offers to retry the failed action.
    pub retry: bool,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            retry: false,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
            retry: false,
        }
    }

    pub fn error_with_retry(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            retry: true,
        }
    }
}

/// Read-only snapshot of the sidebar for rendering.
#[derive(Debug)]
pub struct SidebarViewModel<'a> {
    pub items: &'a [MenuItem],
    pub current: Option<&'a MenuItem>,
    pub route: &'a str,
    pub is_sub_menu_open: bool,
    pub is_drawer_open: bool,
    pub is_fetching: bool,
}

/// Visible rows of the current item's sub-menu.
#[derive(Debug)]
pub struct SubMenuViewModel<'a> {
    pub title: &'a str,
    pub rows: Vec<FlattenedNode<'a, MenuItem>>,
    /// Nesting limit the tree surface enforces for drops.
    pub max_depth: usize,
    pub has_expanded_item: bool,
}
