//! Property-based tests for the workspace controller
//!
//! Random sequences of group and tab operations must keep the group map
//! and the workspace tree in agreement and never leave the tree empty.

use std::collections::HashSet;

use proptest::prelude::*;
use termdeck_core::id::GroupId;
use termdeck_core::pane::Pane;
use termdeck_core::split::{CycleDirection, SplitDirection};
use termdeck_core::workspace::{TabKind, TabSpec, Workspace};

#[derive(Debug, Clone)]
enum WorkspaceOp {
    AddTab,
    CloseTab(usize),
    SelectTab(usize),
    SplitGroup(SplitDirection),
    CloseGroup(usize),
    FocusGroup(usize),
    CycleGroup(CycleDirection),
    CycleTab(CycleDirection),
    OpenSettings,
    AddSettingsSpec,
}

fn cycle_strategy() -> impl Strategy<Value = CycleDirection> {
    prop_oneof![Just(CycleDirection::Next), Just(CycleDirection::Previous)]
}

fn op_strategy() -> impl Strategy<Value = WorkspaceOp> {
    prop_oneof![
        3 => Just(WorkspaceOp::AddTab),
        2 => (0usize..8).prop_map(WorkspaceOp::CloseTab),
        1 => (0usize..8).prop_map(WorkspaceOp::SelectTab),
        2 => prop_oneof![
            Just(SplitDirection::Horizontal),
            Just(SplitDirection::Vertical)
        ]
        .prop_map(WorkspaceOp::SplitGroup),
        1 => (0usize..8).prop_map(WorkspaceOp::CloseGroup),
        1 => (0usize..8).prop_map(WorkspaceOp::FocusGroup),
        1 => cycle_strategy().prop_map(WorkspaceOp::CycleGroup),
        1 => cycle_strategy().prop_map(WorkspaceOp::CycleTab),
        1 => Just(WorkspaceOp::OpenSettings),
        1 => Just(WorkspaceOp::AddSettingsSpec),
    ]
}

fn apply(ws: &mut Workspace, op: &WorkspaceOp) {
    match op {
        WorkspaceOp::AddTab => {
            let pane = Pane::pending(ws.ids().pane_id());
            ws.add_tab_to_focused_group(TabSpec::single_pane(TabKind::Local, "t", pane));
        }
        WorkspaceOp::CloseTab(index) => {
            let tabs: Vec<_> = ws.tabs().iter().map(|tab| tab.id.clone()).collect();
            if let Some(id) = tabs.get(index % tabs.len().max(1)) {
                ws.close_tab(id);
            }
        }
        WorkspaceOp::SelectTab(index) => {
            let tabs: Vec<_> = ws.tabs().iter().map(|tab| tab.id.clone()).collect();
            if let Some(id) = tabs.get(index % tabs.len().max(1))
                && let Some(group_id) = ws.group_of_tab(id).cloned()
            {
                ws.select_tab(&group_id, id);
            }
        }
        WorkspaceOp::SplitGroup(direction) => {
            ws.split_focused_group(*direction);
        }
        WorkspaceOp::CloseGroup(index) => {
            let groups = ws.group_ids();
            let id = groups[index % groups.len()].clone();
            ws.close_group(&id);
        }
        WorkspaceOp::FocusGroup(index) => {
            let groups = ws.group_ids();
            let id = groups[index % groups.len()].clone();
            ws.focus_group(&id);
        }
        WorkspaceOp::CycleGroup(direction) => {
            ws.cycle_focused_pane_group(*direction);
        }
        WorkspaceOp::CycleTab(direction) => {
            ws.cycle_focused_group_tab(*direction);
        }
        WorkspaceOp::OpenSettings => {
            ws.open_settings("Settings");
        }
        WorkspaceOp::AddSettingsSpec => {
            let pane = Pane::pending(ws.ids().pane_id());
            ws.add_tab_to_focused_group(TabSpec::single_pane(TabKind::Settings, "s", pane));
        }
    }
}

fn assert_consistent(ws: &Workspace) {
    let leaf_ids = ws.tree().leaf_ids();
    let tree_ids: HashSet<GroupId> = leaf_ids.iter().cloned().collect();
    assert!(!tree_ids.is_empty(), "workspace tree is empty");
    assert_eq!(tree_ids.len(), leaf_ids.len(), "duplicate group leaf");
    assert_eq!(ws.group_count(), tree_ids.len(), "group map and tree disagree");
    for group_id in &tree_ids {
        assert!(ws.group(group_id).is_some(), "no map entry for {group_id}");
    }
    assert!(tree_ids.contains(ws.focused_group_id()));
    assert!(ws.tree().is_well_formed());

    let mut seen_tabs = HashSet::new();
    for group in ws.groups() {
        match &group.active_tab_id {
            Some(active) => assert!(group.tab(active).is_some()),
            None => assert!(group.tabs.is_empty()),
        }
        for tab in &group.tabs {
            assert!(seen_tabs.insert(tab.id.clone()), "duplicate tab {}", tab.id);
            assert!(tab.contains_pane(&tab.focused_pane_id));
        }
    }

    let settings = ws
        .tabs()
        .iter()
        .filter(|tab| tab.kind == TabKind::Settings)
        .count();
    assert!(settings <= 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn operations_keep_workspace_consistent(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let mut ws = Workspace::new();
        for op in &ops {
            apply(&mut ws, op);
            assert_consistent(&ws);
        }
    }

    #[test]
    fn closing_every_group_leaves_one_empty_group(ops in proptest::collection::vec(op_strategy(), 0..30)) {
        let mut ws = Workspace::new();
        for op in &ops {
            apply(&mut ws, op);
        }

        while ws.group_count() > 1 || ws.tab_count() > 0 {
            let id = ws.focused_group_id().clone();
            ws.close_group(&id);
        }

        prop_assert_eq!(ws.group_count(), 1);
        let group = ws.focused_group().unwrap();
        prop_assert!(group.tabs.is_empty());
        prop_assert!(group.active_tab_id.is_none());
        prop_assert!(ws.tree().is_leaf());
    }

    #[test]
    fn split_focuses_new_group(ops in proptest::collection::vec(op_strategy(), 0..20), vertical in any::<bool>()) {
        let mut ws = Workspace::new();
        for op in &ops {
            apply(&mut ws, op);
        }
        let before = ws.group_count();
        let direction = if vertical { SplitDirection::Vertical } else { SplitDirection::Horizontal };

        let new_group = ws.split_focused_group(direction);

        prop_assert_eq!(ws.group_count(), before + 1);
        prop_assert_eq!(ws.focused_group_id(), &new_group);
        prop_assert!(ws.group(&new_group).unwrap().is_empty());
    }
}
