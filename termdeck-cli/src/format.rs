//! Text rendering of workspace snapshots.

use std::fmt::Write as _;

use termdeck_core::id::SessionId;
use termdeck_core::pane::{Pane, PaneTree};
use termdeck_core::split::LayoutNode;
use termdeck_core::workspace::{GroupLeaf, PaneGroup, Tab, WorkspaceSnapshot};

const INDENT: &str = "  ";

/// Renders the workspace as an indented tree.
///
/// Focused groups, active tabs and focused panes are marked with `*`.
pub fn render_workspace(snapshot: &WorkspaceSnapshot) -> String {
    let mut out = String::new();
    render_group_node(&mut out, snapshot, &snapshot.tree, 0);
    out
}

fn render_group_node(
    out: &mut String,
    snapshot: &WorkspaceSnapshot,
    node: &LayoutNode<GroupLeaf>,
    depth: usize,
) {
    let pad = INDENT.repeat(depth);
    match node {
        LayoutNode::Split(split) => {
            let _ = writeln!(
                out,
                "{pad}split {} {} {}",
                split.id,
                split.direction,
                format_sizes(&split.sizes)
            );
            for child in &split.children {
                render_group_node(out, snapshot, child, depth + 1);
            }
        }
        LayoutNode::Leaf(leaf) => {
            let marker = focus_marker(leaf.id == snapshot.focused_group_id);
            let _ = writeln!(out, "{pad}group {}{marker}", leaf.id);
            match snapshot.groups.iter().find(|group| group.id == leaf.id) {
                Some(group) => render_group(out, group, depth + 1),
                None => {
                    let _ = writeln!(out, "{pad}{INDENT}(missing)");
                }
            }
        }
    }
}

fn render_group(out: &mut String, group: &PaneGroup, depth: usize) {
    if group.tabs.is_empty() {
        let _ = writeln!(out, "{}(no tabs)", INDENT.repeat(depth));
        return;
    }
    for tab in &group.tabs {
        let active = group.active_tab_id.as_ref() == Some(&tab.id);
        render_tab(out, tab, active, depth);
    }
}

fn render_tab(out: &mut String, tab: &Tab, active: bool, depth: usize) {
    let _ = writeln!(
        out,
        "{}tab {} [{}] {:?}{}",
        INDENT.repeat(depth),
        tab.id,
        tab.kind,
        tab.title,
        focus_marker(active)
    );
    render_pane_node(out, tab, &tab.pane_tree, depth + 1);
}

fn render_pane_node(out: &mut String, tab: &Tab, node: &PaneTree, depth: usize) {
    let pad = INDENT.repeat(depth);
    match node {
        LayoutNode::Split(split) => {
            let _ = writeln!(
                out,
                "{pad}split {} {} {}",
                split.id,
                split.direction,
                format_sizes(&split.sizes)
            );
            for child in &split.children {
                render_pane_node(out, tab, child, depth + 1);
            }
        }
        LayoutNode::Leaf(pane) => {
            let _ = writeln!(
                out,
                "{pad}{}{}",
                describe_pane(pane),
                focus_marker(pane.id() == &tab.focused_pane_id)
            );
        }
    }
}

fn describe_pane(pane: &Pane) -> String {
    match pane.binding() {
        Some(binding) => format!("{} {} -> {binding}", pane.kind(), pane.id()),
        None => format!("{} {}", pane.kind(), pane.id()),
    }
}

fn format_sizes(sizes: &[f64]) -> String {
    let parts: Vec<String> = sizes.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

const fn focus_marker(focused: bool) -> &'static str {
    if focused { " *" } else { "" }
}

/// Renders the live session list, one id per line.
pub fn render_sessions(live: &[SessionId]) -> String {
    if live.is_empty() {
        return "live sessions: none\n".to_string();
    }
    let mut out = format!("live sessions ({}):\n", live.len());
    for id in live {
        let _ = writeln!(out, "{INDENT}{id}");
    }
    out
}
