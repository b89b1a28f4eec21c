use serde::{Deserialize, Serialize};

use super::model::{MenuItem, MenuItemId};
use super::store::collapse_all_expanded;

/// How route synchronization treats nodes off the active chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionMode {
    /// At most one expanded node per level; everything off-chain collapses.
    #[default]
    SingleBranch,
    /// Chain nodes are expanded, other nodes keep their flags.
    MultiBranch,
}

/// Expansion behaviour of one sidebar presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionPolicy {
    pub mode: ExpansionMode,
    /// In multi-branch mode, collapse everything off-chain before expanding.
    pub reset_on_sync: bool,
}

impl ExpansionPolicy {
    pub const fn single_branch() -> Self {
        Self {
            mode: ExpansionMode::SingleBranch,
            reset_on_sync: false,
        }
    }

    pub const fn multi_branch(reset_on_sync: bool) -> Self {
        Self {
            mode: ExpansionMode::MultiBranch,
            reset_on_sync,
        }
    }

    fn collapses_off_chain(self) -> bool {
        match self.mode {
            ExpansionMode::SingleBranch => true,
            ExpansionMode::MultiBranch => self.reset_on_sync,
        }
    }
}

/// Ids of the nodes on the active chain, root first.
pub type ActiveChain = Vec<MenuItemId>;

/// Return whether `path` denotes `route` or one of its ancestors.
///
/// Matching is segment aware: `/a` covers `/a/b` but not `/ab`. The root
/// path `/` only covers the route `/` itself. Query strings and fragments
/// on the route are ignored.
pub fn is_route_ancestor(path: &str, route: &str) -> bool {
    let route = route.split(['?', '#']).next().unwrap_or_default();
    let path = normalize(path);
    let route = normalize(route);

    if path == "/" {
        return route == "/";
    }
    route == path
        || route
            .strip_prefix(path)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Expand the chain of nodes leading to `route` and return it.
///
/// A node is on the chain when its path covers the route or when one of its
/// descendants is on the chain, so a deep URL always opens every ancestor.
/// Only the first matching sibling of each group joins the chain. Nodes off
/// the chain are collapsed according to `policy`.
pub fn expand_tree(
    items: &mut [MenuItem],
    route: &str,
    policy: ExpansionPolicy,
) -> ActiveChain {
    let mut chain = ActiveChain::new();
    sync_group(items, route, policy.collapses_off_chain(), &mut chain);
    chain
}

fn sync_group(
    items: &mut [MenuItem],
    route: &str,
    collapse_others: bool,
    chain: &mut ActiveChain,
) -> bool {
    let mut claimed = false;

    for item in items.iter_mut() {
        if claimed {
            if collapse_others {
                item.expanded = false;
                collapse_all_expanded(&mut item.children);
            }
            continue;
        }

        let mark = chain.len();
        let covers_route = is_route_ancestor(&item.path, route);
        let below =
            sync_group(&mut item.children, route, collapse_others, chain);

        if covers_route || below {
            chain.insert(mark, item.id.clone());
            item.expanded = true;
            claimed = true;
        } else if collapse_others {
            item.expanded = false;
        }
    }

    claimed
}
