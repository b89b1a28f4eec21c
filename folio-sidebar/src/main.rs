use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use env_logger::Env;
use folio_sidebar::menu::MenuSnapshot;
use folio_sidebar::settings::load_initial_settings;
use folio_sidebar::{
    InMemoryMenuService, SidebarIntent, SidebarRuntime, SidebarView,
};

const USAGE: &str =
    "usage: folio-sidebar [--settings <file>] [--drawer] <snapshot.json> [route]";

struct Args {
    settings: Option<PathBuf>,
    view: SidebarView,
    snapshot: PathBuf,
    route: String,
}

fn parse_args() -> Result<Args> {
    let mut settings = None;
    let mut view = SidebarView::Rail;
    let mut positional = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                let path = args.next().context("--settings needs a path")?;
                settings = Some(PathBuf::from(path));
            },
            "--drawer" => view = SidebarView::Drawer,
            "-h" | "--help" => bail!(USAGE),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let Some(snapshot) = positional.next() else {
        bail!(USAGE);
    };
    Ok(Args {
        settings,
        view,
        snapshot: PathBuf::from(snapshot),
        route: positional.next().unwrap_or_else(|| String::from("/")),
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = parse_args()?;
    let settings = load_initial_settings(args.settings.as_deref());

    let content = std::fs::read_to_string(&args.snapshot).with_context(|| {
        format!("failed to read snapshot {}", args.snapshot.display())
    })?;
    let snapshot: MenuSnapshot = serde_json::from_str(&content)
        .with_context(|| {
            format!("failed to parse snapshot {}", args.snapshot.display())
        })?;

    let service = InMemoryMenuService::from_snapshot(snapshot);
    let mut runtime = SidebarRuntime::new(settings, service, args.view);
    runtime.dispatch(SidebarIntent::FetchRequested);
    runtime.dispatch(SidebarIntent::RouteChanged { path: args.route });
    if args.view == SidebarView::Drawer {
        runtime.dispatch(SidebarIntent::DrawerVisibilityChanged { open: true });
    }
    runtime.run_until_idle().await;

    let widget = runtime.widget();
    let vm = widget.vm();
    println!("route: {}", vm.route);
    for item in vm.items {
        let marker = if item.expanded { '*' } else { ' ' };
        println!("{marker} {} ({})", item.title, item.path);
    }

    if let Some(sub_menu) = widget.sub_menu_vm(runtime.settings()) {
        println!();
        println!("{} (max depth {})", sub_menu.title, sub_menu.max_depth);
        for row in sub_menu.rows {
            let marker = if row.node.expanded { '*' } else { ' ' };
            let indent = "  ".repeat(row.depth + 1);
            println!("{marker}{indent}{} ({})", row.node.title, row.node.path);
        }
    }
    Ok(())
}
