//! Menu forest assembly, route conversion and subtree walks.
//!
//! All functions are pure and terminate on malformed parent graphs: every
//! walk tracks visited ids, so a cycle or duplicate id is emitted at most once.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::domain::types::{MenuMeta, MenuNode, MenuRoute, MenuTreeNode};

/// Nest `nodes` under `parent_id`. Sibling order follows input order.
pub fn build_tree(nodes: &[MenuNode], parent_id: i64) -> Vec<MenuTreeNode> {
    let mut by_parent: HashMap<i64, Vec<&MenuNode>> = HashMap::new();
    for node in nodes {
        by_parent.entry(node.parent_id).or_default().push(node);
    }
    let mut visited = HashSet::new();
    build_level(&by_parent, parent_id, &mut visited)
}

fn build_level(
    by_parent: &HashMap<i64, Vec<&MenuNode>>,
    parent_id: i64,
    visited: &mut HashSet<i64>,
) -> Vec<MenuTreeNode> {
    let Some(children) = by_parent.get(&parent_id) else {
        return Vec::new();
    };
    let mut level = Vec::with_capacity(children.len());
    for node in children {
        if !visited.insert(node.id) {
            continue;
        }
        level.push(MenuTreeNode {
            id: node.id,
            parent_id: node.parent_id,
            title: node.title.clone(),
            name: node.name.clone(),
            path: node.path.clone(),
            component: node.component.clone(),
            icon: node.icon.clone(),
            sort: node.sort,
            hidden: node.hidden,
            keep_alive: node.keep_alive,
            status: node.status,
            created_at: node.created_at,
            children: build_level(by_parent, node.id, visited),
        });
    }
    level
}

/// Convert a tree into frontend routes. A hidden node is dropped together
/// with its whole subtree, visible descendants included.
pub fn to_route_tree(tree: &[MenuTreeNode]) -> Vec<MenuRoute> {
    tree.iter()
        .filter(|node| node.hidden != 1)
        .map(|node| MenuRoute {
            id: node.id,
            title: node.title.clone(),
            name: node.name.clone(),
            path: node.path.clone().unwrap_or_default(),
            component: node.component.clone().unwrap_or_default(),
            meta: MenuMeta {
                icon: node.icon.clone(),
                title: node.title.clone(),
                hidden: node.hidden == 1,
                keep_alive: node.keep_alive == 1,
            },
            children: to_route_tree(&node.children),
        })
        .collect()
}

/// Every transitive descendant of `root` over `(id, parent_id)` edges,
/// breadth-first. `root` itself is not included.
pub fn descendant_ids(edges: &[(i64, i64)], root: i64) -> Vec<i64> {
    let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
    for &(id, parent_id) in edges {
        children.entry(parent_id).or_default().push(id);
    }

    let mut visited = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);
    let mut out = Vec::new();
    while let Some(current) = queue.pop_front() {
        for &child in children.get(&current).map(Vec::as_slice).unwrap_or_default() {
            if visited.insert(child) {
                out.push(child);
                queue.push_back(child);
            }
        }
    }
    out
}

/// `root` followed by all of its descendants.
pub fn subtree_ids(edges: &[(i64, i64)], root: i64) -> Vec<i64> {
    let mut ids = vec![root];
    ids.extend(descendant_ids(edges, root));
    ids
}

/// Whether re-parenting `node_id` under `new_parent` would close a loop.
pub fn would_create_cycle(edges: &[(i64, i64)], node_id: i64, new_parent: i64) -> bool {
    new_parent == node_id || descendant_ids(edges, node_id).contains(&new_parent)
}
