use super::event::{SidebarEffect, SidebarIntent};
use super::model::{Notification, SidebarView};
use super::state::SidebarState;
use crate::menu::store::{
    collapse_all_expanded, collapse_all_neighbors,
    collapse_parent_children_by_key_value, find_by_id, find_by_key,
    insert_sub_menu_item, toggle_expanded, update_by_key_value,
};
use crate::menu::{
    CreatedPage, MenuItem, MenuItemId, MenuItemPatch, MenuKey, MenuSnapshot,
    MoveRequest, expand_tree, move_node,
};
use crate::settings::SidebarSettings;

const PAGE_CREATED_MESSAGE: &str = "Page successfully created";
const PAGE_CREATE_FAILED_MESSAGE: &str = "Something went wrong";
const MENU_UPDATE_FAILED_MESSAGE: &str = "Menu order could not be saved";

/// Read-only context for sidebar reduction.
pub struct SidebarCtx<'a> {
    pub settings: &'a SidebarSettings,
    /// Presentation whose expansion policy applies to route changes.
    pub view: SidebarView,
}

/// Reduce a sidebar intent into state updates and effects.
pub(super) fn reduce(
    state: &mut SidebarState,
    intent: SidebarIntent,
    ctx: &SidebarCtx<'_>,
) -> Vec<SidebarEffect> {
    use SidebarIntent::*;

    match intent {
        RailItemPressed { id } => rail_item_pressed(state, id),
        SubMenuItemPressed { id } => sub_menu_item_pressed(state, &id),
        ToggleSubMenu => {
            let open = state.is_sub_menu_open();
            state.set_sub_menu_open(!open);
            Vec::new()
        },
        OutsideClicked => {
            state.set_sub_menu_open(false);
            Vec::new()
        },
        NodeToggled { id } => {
            toggle_expanded(state.items_mut(), &id);
            Vec::new()
        },
        TreeChanged { children } => tree_changed(state, children),
        NodeMoved(request) => node_moved(state, &request),
        DrawerVisibilityChanged { open } => {
            state.set_drawer_open(open);
            if open {
                sync_expansion(state, ctx.settings, SidebarView::Drawer);
            }
            Vec::new()
        },
        DrawerItemPressed { id } => {
            collapse_all_expanded(state.items_mut());
            state.set_current_menu_item(Some(id.clone()));
            click_item(state, &id)
        },
        DrawerChildPressed { id } => drawer_child_pressed(state, &id),
        DrawerSubMenuItemPressed { id } => {
            collapse_all_neighbors(state.items_mut(), &id);
            click_item(state, &id)
        },
        DrawerBackPressed => drawer_back_pressed(state),
        CreatePageRequested => vec![SidebarEffect::CreatePage {
            parent: state.current_id().cloned(),
            name: ctx.settings.new_page_name.clone(),
        }],
        RouteChanged { path } => {
            state.set_route(path);
            sync_expansion(state, ctx.settings, ctx.view);
            Vec::new()
        },
        FetchRequested => vec![request_fetch(state)],
        MenuFetched {
            generation,
            snapshot,
        } => menu_fetched(state, generation, snapshot, ctx),
        FetchFailed {
            generation,
            message,
        } => {
            if state.is_latest_fetch(generation) {
                state.set_fetching(false);
                log::warn!("menu fetch failed: {message}");
            }
            Vec::new()
        },
        PageCreated { page } => page_created(state, page),
        PageCreateFailed { message } => {
            log::warn!("page creation failed: {message}");
            vec![SidebarEffect::Notify(Notification::error_with_retry(
                PAGE_CREATE_FAILED_MESSAGE,
            ))]
        },
        UpdateCompleted => vec![request_fetch(state)],
        UpdateFailed { message } => {
            log::warn!("menu update failed: {message}");
            vec![
                SidebarEffect::Notify(Notification::warning(
                    MENU_UPDATE_FAILED_MESSAGE,
                )),
                request_fetch(state),
            ]
        },
    }
}

fn rail_item_pressed(
    state: &mut SidebarState,
    id: MenuItemId,
) -> Vec<SidebarEffect> {
    let Some(item) = find_by_id(state.items(), &id) else {
        log::debug!("rail item {id} not found");
        return Vec::new();
    };
    let has_children = item.has_children();
    let path = item.path.clone();
    let same_item = state.current_id() == Some(&id);
    let was_open = state.is_sub_menu_open();

    state.set_sub_menu_open(has_children);
    state.set_current_menu_item(has_children.then(|| id.clone()));

    if !same_item {
        collapse_all_expanded(state.items_mut());
        toggle_expanded(state.items_mut(), &id);
        return vec![SidebarEffect::Navigate { path }];
    }
    if was_open {
        collapse_parent_children_by_key_value(
            state.items_mut(),
            MenuKey::Id,
            id.as_str(),
        );
        state.set_sub_menu_open(false);
        return vec![SidebarEffect::Navigate { path }];
    }
    Vec::new()
}

fn sub_menu_item_pressed(
    state: &mut SidebarState,
    id: &MenuItemId,
) -> Vec<SidebarEffect> {
    let Some(item) = find_by_id(state.items(), id) else {
        log::debug!("sub-menu item {id} not found");
        return Vec::new();
    };
    let is_leaf = !item.has_children();
    let path = item.path.clone();

    // The page being left stops being highlighted.
    let previous = find_by_key(state.items(), MenuKey::Path, state.route())
        .filter(|previous| !previous.has_children())
        .map(|previous| previous.id.clone());
    if let Some(previous) = previous {
        update_by_key_value(
            state.items_mut(),
            MenuItemPatch::expanded(false),
            MenuKey::Id,
            previous.as_str(),
        );
    }

    if is_leaf {
        state.set_sub_menu_open(false);
    }
    vec![SidebarEffect::Navigate { path }]
}

fn tree_changed(
    state: &mut SidebarState,
    children: Vec<MenuItem>,
) -> Vec<SidebarEffect> {
    let Some(current) = state.current_id().cloned() else {
        log::debug!("tree changed without a current menu item");
        return Vec::new();
    };
    update_by_key_value(
        state.items_mut(),
        MenuItemPatch {
            expanded: Some(true),
            children: Some(children),
            ..MenuItemPatch::default()
        },
        MenuKey::Id,
        current.as_str(),
    );
    Vec::new()
}

fn node_moved(
    state: &mut SidebarState,
    request: &MoveRequest,
) -> Vec<SidebarEffect> {
    let current = state.current_id().cloned();
    match move_node(state.items_mut(), current.as_ref(), request) {
        Ok(outcome) if outcome.records.is_empty() => Vec::new(),
        Ok(outcome) => vec![SidebarEffect::UpdateMenuItems {
            records: outcome.records,
        }],
        Err(err) => {
            log::warn!("menu move rejected: {err}");
            Vec::new()
        },
    }
}

fn drawer_child_pressed(
    state: &mut SidebarState,
    id: &MenuItemId,
) -> Vec<SidebarEffect> {
    let Some(item) = find_by_id(state.items(), id) else {
        log::debug!("drawer child {id} not found");
        return Vec::new();
    };
    let has_children = item.has_children();
    let parent = item.parent.as_ref().and_then(|parent| {
        find_by_id(state.items(), parent)
            .or_else(|| {
                find_by_key(state.items(), MenuKey::Path, parent.as_str())
            })
            .map(|parent| parent.id.clone())
    });

    if parent.is_some() {
        state.set_current_menu_item(parent);
    }
    let effects = click_item(state, id);
    if has_children {
        state.set_sub_menu_open(true);
    }
    effects
}

fn drawer_back_pressed(state: &mut SidebarState) -> Vec<SidebarEffect> {
    let Some(current) = state.current_item() else {
        return Vec::new();
    };
    let id = current.id.clone();
    let path = current.path.clone();

    state.set_sub_menu_open(false);
    collapse_parent_children_by_key_value(
        state.items_mut(),
        MenuKey::Id,
        id.as_str(),
    );
    vec![SidebarEffect::Navigate { path }]
}

// Shared drawer behaviour: a branch toggles and resets its descendants, a
// leaf closes the drawer. Both navigate to the item.
fn click_item(state: &mut SidebarState, id: &MenuItemId) -> Vec<SidebarEffect> {
    let Some(item) = find_by_id(state.items(), id) else {
        log::debug!("drawer item {id} not found");
        return Vec::new();
    };
    let has_children = item.has_children();
    let path = item.path.clone();

    toggle_expanded(state.items_mut(), id);

    let mut effects = Vec::with_capacity(2);
    if has_children {
        collapse_parent_children_by_key_value(
            state.items_mut(),
            MenuKey::Id,
            id.as_str(),
        );
    } else {
        effects.push(SidebarEffect::CloseDrawer);
    }
    effects.push(SidebarEffect::Navigate { path });
    effects
}

fn menu_fetched(
    state: &mut SidebarState,
    generation: u64,
    snapshot: MenuSnapshot,
    ctx: &SidebarCtx<'_>,
) -> Vec<SidebarEffect> {
    if !state.is_latest_fetch(generation) {
        log::debug!("ignoring stale menu fetch {generation}");
        return Vec::new();
    }

    state.set_fetching(false);
    state.apply_snapshot(
        snapshot.into_forest(),
        &ctx.settings.static_menu_items(),
    );
    sync_expansion(state, ctx.settings, ctx.view);
    Vec::new()
}

fn page_created(
    state: &mut SidebarState,
    page: CreatedPage,
) -> Vec<SidebarEffect> {
    let item = state.current_item().map(|parent| page.to_menu_item(parent));
    let path = match (item, state.current_id().cloned()) {
        (Some(item), Some(parent)) => {
            let path = item.path.clone();
            insert_sub_menu_item(state.items_mut(), &parent, item);
            let open = state.is_sub_menu_open();
            state.set_sub_menu_open(!open);
            path
        },
        _ => {
            log::warn!("created page {} has no menu anchor", page.id);
            page.path.clone().unwrap_or_else(|| format!("/page/{}", page.id))
        },
    };

    vec![
        SidebarEffect::Navigate { path },
        SidebarEffect::Notify(Notification::success(PAGE_CREATED_MESSAGE)),
        request_fetch(state),
    ]
}

fn request_fetch(state: &mut SidebarState) -> SidebarEffect {
    SidebarEffect::FetchMenu {
        generation: state.begin_fetch(),
    }
}

// Re-expand the active chain for the stored route. A route that lands
// inside a branch selects that branch when nothing is selected yet.
fn sync_expansion(
    state: &mut SidebarState,
    settings: &SidebarSettings,
    view: SidebarView,
) {
    let route = state.route().to_owned();
    let chain = expand_tree(state.items_mut(), &route, settings.policy(view));

    if state.current_id().is_some() {
        return;
    }
    let root = chain
        .first()
        .filter(|root| {
            find_by_id(state.items(), root).is_some_and(MenuItem::has_children)
        })
        .cloned();
    if root.is_some() {
        state.set_current_menu_item(root);
    }
}
