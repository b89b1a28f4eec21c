//! Folio navigation sidebar.
//!
//! Keeps a forest of menu items in sync with the current route, applies
//! drag-and-drop moves optimistically and reconciles the tree with the
//! remote menu store after every change.

pub mod menu;
pub mod runtime;
pub mod services;
pub mod settings;
pub mod widgets;

pub use runtime::SidebarRuntime;
pub use services::{InMemoryMenuService, MenuService, ServiceError, ServiceOp};
pub use settings::SidebarSettings;
pub use widgets::sidebar::{
    SidebarEffect, SidebarIntent, SidebarView, SidebarWidget,
};
