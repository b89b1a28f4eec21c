use crate::menu::store::{find_by_id, find_by_key};
use crate::menu::{MenuItem, MenuItemId, MenuKey, reconcile};

/// Internal state of the sidebar menu.
///
/// The current item is held by id and resolved against the forest on
/// every read, so it always reflects the latest tree.
#[derive(Debug, Default)]
pub(super) struct SidebarState {
    items: Vec<MenuItem>,
    current: Option<MenuItemId>,
    route: String,
    sub_menu_open: bool,
    drawer_open: bool,
    fetching: bool,
    fetch_generation: u64,
}

impl SidebarState {
    pub(super) fn with_items(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            route: String::from("/"),
            ..Self::default()
        }
    }

    pub(super) fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub(super) fn items_mut(&mut self) -> &mut Vec<MenuItem> {
        &mut self.items
    }

    pub(super) fn current_id(&self) -> Option<&MenuItemId> {
        self.current.as_ref()
    }

    pub(super) fn current_item(&self) -> Option<&MenuItem> {
        self.current
            .as_ref()
            .and_then(|id| find_by_id(&self.items, id))
    }

    pub(super) fn set_current_menu_item(&mut self, id: Option<MenuItemId>) {
        self.current = id;
    }

    pub(super) fn route(&self) -> &str {
        &self.route
    }

    pub(super) fn set_route(&mut self, route: String) {
        self.route = route;
    }

    pub(super) fn is_sub_menu_open(&self) -> bool {
        self.sub_menu_open
    }

    pub(super) fn set_sub_menu_open(&mut self, open: bool) {
        self.sub_menu_open = open;
    }

    pub(super) fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub(super) fn set_drawer_open(&mut self, open: bool) {
        self.drawer_open = open;
    }

    pub(super) fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub(super) fn set_fetching(&mut self, fetching: bool) {
        self.fetching = fetching;
    }

    /// Start a new fetch and return its generation.
    pub(super) fn begin_fetch(&mut self) -> u64 {
        self.fetch_generation += 1;
        self.fetching = true;
        self.fetch_generation
    }

    pub(super) fn is_latest_fetch(&self, generation: u64) -> bool {
        generation == self.fetch_generation
    }

    /// Replace the forest with the merge of `remote` onto the local tree.
    ///
    /// A current item whose id vanished is re-resolved by path, so a static
    /// entry replaced by its remote counterpart stays selected.
    pub(super) fn apply_snapshot(
        &mut self,
        remote: Vec<MenuItem>,
        statics: &[MenuItem],
    ) {
        let current_path = self.current_item().map(|item| item.path.clone());
        self.items = reconcile(&self.items, remote, statics);

        if self.current_item().is_some() {
            return;
        }
        self.current = current_path.and_then(|path| {
            find_by_key(&self.items, MenuKey::Path, &path)
                .map(|item| item.id.clone())
        });
    }
}
