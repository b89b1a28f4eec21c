use folio_sidebar::menu::store::find_by_id;
use folio_sidebar::menu::{
    ExpansionPolicy, MenuItem, MenuItemId, MenuRecord, MoveRequest,
    expand_tree, move_node,
};
use folio_sidebar::widgets::sidebar::NotificationLevel;
use folio_sidebar::{
    InMemoryMenuService, ServiceOp, SidebarIntent, SidebarRuntime,
    SidebarSettings, SidebarView,
};

fn id(value: &str) -> MenuItemId {
    MenuItemId::from(value)
}

fn record(
    value: &str,
    parent: Option<&str>,
    weight: u32,
    path: &str,
) -> MenuRecord {
    MenuRecord {
        id: id(value),
        parent: parent.map(MenuItemId::from),
        weight,
        name: value.to_uppercase(),
        title: value.to_uppercase(),
        path: String::from(path),
        icon_component_name: None,
    }
}

fn service() -> InMemoryMenuService {
    InMemoryMenuService::new(vec![
        record("p1", Some("general"), 1, "/general/p1"),
        record("p2", Some("general"), 2, "/general/p2"),
        record("c1", Some("p1"), 1, "/general/p1/c1"),
    ])
}

async fn loaded(view: SidebarView) -> SidebarRuntime<InMemoryMenuService> {
    let mut runtime =
        SidebarRuntime::new(SidebarSettings::default(), service(), view);
    runtime.handle(SidebarIntent::FetchRequested).await;
    runtime
}

fn expanded(
    runtime: &SidebarRuntime<InMemoryMenuService>,
    value: &str,
) -> bool {
    find_by_id(runtime.widget().items(), &id(value))
        .map(|item| item.expanded)
        .unwrap_or(false)
}

fn children_of(
    runtime: &SidebarRuntime<InMemoryMenuService>,
    value: &str,
) -> Vec<String> {
    find_by_id(runtime.widget().items(), &id(value))
        .map(|item| {
            item.children
                .iter()
                .map(|child| child.id.to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn given_route_inside_first_child_when_expanded_then_sibling_stays_closed() {
    let mut forest = vec![
        MenuItem::new("a", "/a", "A", 1).with_children(vec![
            MenuItem::new("b", "/a/b", "B", 1).with_parent("a"),
            MenuItem::new("c", "/a/c", "C", 2).with_parent("a"),
        ]),
    ];

    expand_tree(&mut forest, "/a/b", ExpansionPolicy::single_branch());

    let a = &forest[0];
    assert!(a.expanded);
    assert!(a.children[0].expanded);
    assert!(!a.children[1].expanded);
}

#[test]
fn given_sibling_when_moved_under_other_sibling_then_tree_and_weights_update() {
    let mut forest = vec![
        MenuItem::new("a", "/a", "A", 1).with_children(vec![
            MenuItem::new("b", "/a/b", "B", 1).with_parent("a"),
            MenuItem::new("c", "/a/c", "C", 2).with_parent("a"),
        ]),
    ];

    move_node(
        &mut forest,
        None,
        &MoveRequest {
            node: id("c"),
            destination_parent: Some(id("b")),
            destination_index: 0,
        },
    )
    .expect("move should succeed");

    let a = &forest[0];
    assert_eq!(a.children.len(), 1);
    let b = &a.children[0];
    assert_eq!(b.weight, 1);
    assert_eq!(b.children.len(), 1);
    let c = &b.children[0];
    assert_eq!(c.id, id("c"));
    assert_eq!(c.parent, Some(id("b")));
    assert_eq!(c.weight, 1);
    assert_eq!(c.path, "/a/c");
}

#[tokio::test]
async fn given_remote_pages_when_fetched_then_they_nest_under_static_entry() {
    let runtime = loaded(SidebarView::Rail).await;

    let vm = runtime.widget().vm();
    assert!(!vm.is_fetching);
    let roots: Vec<_> = vm.items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(roots, vec!["general", "dashboards", "settings"]);
    assert_eq!(children_of(&runtime, "general"), vec!["p1", "p2"]);
    assert_eq!(children_of(&runtime, "p1"), vec!["c1"]);
}

#[tokio::test]
async fn given_deep_route_when_navigated_then_ancestors_expand_and_branch_is_selected()
 {
    let mut runtime = loaded(SidebarView::Rail).await;

    runtime
        .handle(SidebarIntent::RouteChanged {
            path: String::from("/general/p1/c1"),
        })
        .await;

    assert!(expanded(&runtime, "general"));
    assert!(expanded(&runtime, "p1"));
    assert!(expanded(&runtime, "c1"));
    assert!(!expanded(&runtime, "p2"));
    let vm = runtime.widget().vm();
    assert_eq!(vm.current.map(|item| item.id.as_str()), Some("general"));
}

#[tokio::test]
async fn given_expanded_branch_when_refetched_then_expansion_survives() {
    let mut runtime = loaded(SidebarView::Rail).await;
    runtime
        .handle(SidebarIntent::RouteChanged {
            path: String::from("/general/p1/c1"),
        })
        .await;

    runtime.handle(SidebarIntent::FetchRequested).await;

    assert!(expanded(&runtime, "general"));
    assert!(expanded(&runtime, "p1"));
}

#[tokio::test]
async fn given_current_item_when_page_created_then_it_is_inserted_and_opened() {
    let mut runtime = loaded(SidebarView::Rail).await;
    runtime
        .handle(SidebarIntent::RailItemPressed { id: id("general") })
        .await;

    runtime.handle(SidebarIntent::CreatePageRequested).await;

    let created = runtime
        .service()
        .records()
        .last()
        .cloned()
        .expect("page stored remotely");
    assert_eq!(created.parent, Some(id("general")));
    assert_eq!(created.name, "New page");
    assert_eq!(runtime.service().blocks().len(), 1);
    assert_eq!(runtime.service().blocks()[0].parent, created.id);

    assert_eq!(
        children_of(&runtime, "general"),
        vec![
            String::from("p1"),
            String::from("p2"),
            created.id.to_string()
        ]
    );
    assert_eq!(runtime.history().last(), Some(&created.path));
    assert!(expanded(&runtime, created.id.as_str()));

    let notification = runtime.notifications().last().expect("toast");
    assert_eq!(notification.level, NotificationLevel::Success);
    assert_eq!(notification.message, "Page successfully created");
}

#[tokio::test]
async fn given_remote_failure_when_page_created_then_retry_toast_is_shown() {
    let mut runtime = loaded(SidebarView::Rail).await;
    runtime
        .handle(SidebarIntent::RailItemPressed { id: id("general") })
        .await;
    let history = runtime.history().len();
    runtime.service_mut().fail_next(ServiceOp::CreatePage);

    runtime.handle(SidebarIntent::CreatePageRequested).await;

    let notification = runtime.notifications().last().expect("toast");
    assert_eq!(notification.level, NotificationLevel::Error);
    assert_eq!(notification.message, "Something went wrong");
    assert!(notification.retry);
    assert_eq!(runtime.history().len(), history);
    assert_eq!(children_of(&runtime, "general"), vec!["p1", "p2"]);
}

#[tokio::test]
async fn given_top_level_drop_when_acknowledged_then_refetch_keeps_new_order() {
    let mut runtime = loaded(SidebarView::Rail).await;
    runtime
        .handle(SidebarIntent::RailItemPressed { id: id("general") })
        .await;

    runtime
        .handle(SidebarIntent::NodeMoved(MoveRequest {
            node: id("p2"),
            destination_parent: None,
            destination_index: 0,
        }))
        .await;

    let update = runtime.service().updates().last().expect("update sent");
    let sent: Vec<_> = update
        .iter()
        .map(|record| (record.id.as_str(), record.weight))
        .collect();
    assert_eq!(sent, vec![("p2", 1), ("p1", 2)]);
    assert!(
        update
            .iter()
            .all(|record| record.parent == Some(id("general")))
    );
    assert_eq!(children_of(&runtime, "general"), vec!["p2", "p1"]);
}

#[tokio::test]
async fn given_rejected_update_when_refetched_then_remote_order_is_restored() {
    let mut runtime = loaded(SidebarView::Rail).await;
    runtime
        .handle(SidebarIntent::RailItemPressed { id: id("general") })
        .await;
    runtime.service_mut().fail_next(ServiceOp::Update);

    runtime
        .handle(SidebarIntent::NodeMoved(MoveRequest {
            node: id("p2"),
            destination_parent: None,
            destination_index: 0,
        }))
        .await;

    assert!(runtime.service().updates().is_empty());
    assert_eq!(children_of(&runtime, "general"), vec!["p1", "p2"]);
    let notification = runtime.notifications().last().expect("toast");
    assert_eq!(notification.level, NotificationLevel::Warning);
}

#[tokio::test]
async fn given_drawer_leaf_when_pressed_then_drawer_closes_and_navigates() {
    let mut runtime = loaded(SidebarView::Drawer).await;
    runtime
        .handle(SidebarIntent::DrawerVisibilityChanged { open: true })
        .await;
    assert!(runtime.widget().vm().is_drawer_open);

    runtime
        .handle(SidebarIntent::DrawerItemPressed { id: id("settings") })
        .await;

    let vm = runtime.widget().vm();
    assert!(!vm.is_drawer_open);
    assert_eq!(vm.route, "/settings");
    assert_eq!(
        runtime.history().last().map(String::as_str),
        Some("/settings")
    );
}

#[tokio::test]
async fn given_multi_branch_drawer_when_reopened_then_only_active_chain_is_open()
 {
    let mut runtime = loaded(SidebarView::Drawer).await;
    runtime
        .handle(SidebarIntent::RouteChanged {
            path: String::from("/general/p1/c1"),
        })
        .await;
    runtime
        .handle(SidebarIntent::NodeToggled { id: id("p2") })
        .await;
    assert!(expanded(&runtime, "p2"));

    runtime
        .handle(SidebarIntent::DrawerVisibilityChanged { open: true })
        .await;

    assert!(!expanded(&runtime, "p2"));
    assert!(expanded(&runtime, "p1"));
    assert!(expanded(&runtime, "c1"));
}
