mod event;
mod model;
mod reducer;
mod state;

pub use event::{SidebarEffect, SidebarEvent, SidebarIntent};
use folio_ui_tree::flatten_tree;
pub use model::{
    Notification, NotificationLevel, SidebarView, SidebarViewModel,
    SubMenuViewModel,
};
pub use reducer::SidebarCtx;
use state::SidebarState;

use crate::menu::MenuItem;
use crate::menu::store::has_expanded_item;
use crate::settings::SidebarSettings;

/// Sidebar widget owning the menu forest and its selection state.
#[derive(Debug, Default)]
pub struct SidebarWidget {
    state: SidebarState,
}

impl SidebarWidget {
    /// Construct a sidebar with an empty forest.
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Construct a sidebar seeded with the static skeleton from settings.
    pub fn from_settings(settings: &SidebarSettings) -> Self {
        Self::with_items(settings.static_menu_items())
    }

    pub fn with_items(items: Vec<MenuItem>) -> Self {
        Self {
            state: SidebarState::with_items(items),
        }
    }

    /// Reduce an intent into state updates and effects.
    pub fn reduce(
        &mut self,
        intent: SidebarIntent,
        ctx: &SidebarCtx<'_>,
    ) -> Vec<SidebarEffect> {
        reducer::reduce(&mut self.state, intent, ctx)
    }

    /// Build a read-only view model for the presentation layer.
    pub fn vm(&self) -> SidebarViewModel<'_> {
        SidebarViewModel {
            items: self.state.items(),
            current: self.state.current_item(),
            route: self.state.route(),
            is_sub_menu_open: self.state.is_sub_menu_open(),
            is_drawer_open: self.state.is_drawer_open(),
            is_fetching: self.state.is_fetching(),
        }
    }

    /// Return the visible sub-menu rows of the current item.
    pub fn sub_menu_vm(
        &self,
        settings: &SidebarSettings,
    ) -> Option<SubMenuViewModel<'_>> {
        let current = self.state.current_item()?;
        Some(SubMenuViewModel {
            title: &current.title,
            rows: flatten_tree(&current.children),
            max_depth: settings.max_depth_for(current),
            has_expanded_item: has_expanded_item(&current.children),
        })
    }

    pub fn items(&self) -> &[MenuItem] {
        self.state.items()
    }
}
