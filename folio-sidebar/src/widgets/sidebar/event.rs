use crate::menu::{
    CreatedPage, MenuItem, MenuItemId, MenuRecord, MenuSnapshot, MoveRequest,
};

use super::model::Notification;

/// Intent events handled by the sidebar reducer.
#[derive(Debug, Clone)]
pub enum SidebarIntent {
    RailItemPressed { id: MenuItemId },
    SubMenuItemPressed { id: MenuItemId },
    ToggleSubMenu,
    OutsideClicked,
    NodeToggled { id: MenuItemId },
    /// The tree surface replaced the children of the current item.
    TreeChanged { children: Vec<MenuItem> },
    NodeMoved(MoveRequest),
    DrawerVisibilityChanged { open: bool },
    DrawerItemPressed { id: MenuItemId },
    DrawerChildPressed { id: MenuItemId },
    DrawerSubMenuItemPressed { id: MenuItemId },
    DrawerBackPressed,
    CreatePageRequested,
    RouteChanged { path: String },
    FetchRequested,
    MenuFetched { generation: u64, snapshot: MenuSnapshot },
    FetchFailed { generation: u64, message: String },
    PageCreated { page: CreatedPage },
    PageCreateFailed { message: String },
    UpdateCompleted,
    UpdateFailed { message: String },
}

/// Effect events produced by the sidebar reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarEffect {
    FetchMenu { generation: u64 },
    UpdateMenuItems { records: Vec<MenuRecord> },
    CreatePage { parent: Option<MenuItemId>, name: String },
    Navigate { path: String },
    Notify(Notification),
    CloseDrawer,
}

/// Sidebar event stream routed through the runtime loop.
#[derive(Debug, Clone)]
pub enum SidebarEvent {
    /// Intent event reduced by the sidebar widget.
    Intent(SidebarIntent),
    /// External effect executed by the runtime.
    Effect(SidebarEffect),
}
