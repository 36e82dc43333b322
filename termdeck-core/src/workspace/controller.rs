//! Workspace controller
//!
//! Owns the workspace tree, the group map and the focused-group pointer.
//! Every operation is synchronous and applied atomically; an operation
//! naming an unknown group or tab leaves the state unchanged.

use std::collections::HashMap;

use serde::Serialize;

use super::tab::{GroupLeaf, PaneGroup, Tab, TabKind, TabSpec, WorkspaceTree};
use crate::id::{GroupId, IdGenerator, PaneId, SplitId, TabId};
use crate::pane::Pane;
use crate::split::{CycleDirection, RemoveResult, SplitDirection};

/// Workspace layout state.
///
/// # Invariants
///
/// - the tree always contains at least one group;
/// - every group leaf in the tree has exactly one entry in `groups`;
/// - `focused_group_id` always names a group in the tree;
/// - at most one settings tab exists across all groups.
#[derive(Debug, Clone)]
pub struct Workspace {
    tree: WorkspaceTree,
    groups: HashMap<GroupId, PaneGroup>,
    focused_group_id: GroupId,
    ids: IdGenerator,
}

/// Serializable view of a workspace, groups listed in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceSnapshot {
    /// Workspace layout
    pub tree: WorkspaceTree,
    /// Focused group
    pub focused_group_id: GroupId,
    /// Groups in canonical tree order
    pub groups: Vec<PaneGroup>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Creates a workspace with a single empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ids(IdGenerator::new())
    }

    /// Creates a workspace drawing identifiers from the given generator.
    #[must_use]
    pub fn with_ids(ids: IdGenerator) -> Self {
        let group_id = ids.group_id();
        let mut groups = HashMap::new();
        groups.insert(group_id.clone(), PaneGroup::new(group_id.clone()));
        Self {
            tree: WorkspaceTree::leaf(GroupLeaf::new(group_id.clone())),
            groups,
            focused_group_id: group_id,
            ids,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns the identifier generator owned by this workspace.
    #[must_use]
    pub const fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Returns the workspace tree.
    #[must_use]
    pub const fn tree(&self) -> &WorkspaceTree {
        &self.tree
    }

    /// Returns a group by id.
    #[must_use]
    pub fn group(&self, group_id: &GroupId) -> Option<&PaneGroup> {
        self.groups.get(group_id)
    }

    /// Returns group ids in canonical order.
    #[must_use]
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.tree.leaf_ids()
    }

    /// Returns groups in canonical order.
    #[must_use]
    pub fn groups(&self) -> Vec<&PaneGroup> {
        self.tree
            .leaves()
            .into_iter()
            .filter_map(|leaf| self.groups.get(&leaf.id))
            .collect()
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns the focused group id.
    #[must_use]
    pub const fn focused_group_id(&self) -> &GroupId {
        &self.focused_group_id
    }

    /// Returns the focused group.
    #[must_use]
    pub fn focused_group(&self) -> Option<&PaneGroup> {
        self.groups.get(&self.focused_group_id)
    }

    /// Returns the active tab of the focused group.
    #[must_use]
    pub fn active_tab(&self) -> Option<&Tab> {
        self.focused_group().and_then(PaneGroup::active_tab)
    }

    /// Returns the active tab of the focused group mutably.
    #[must_use]
    pub fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        self.groups
            .get_mut(&self.focused_group_id)
            .and_then(PaneGroup::active_tab_mut)
    }

    /// Returns all tabs, groups in canonical order.
    #[must_use]
    pub fn tabs(&self) -> Vec<&Tab> {
        self.groups()
            .into_iter()
            .flat_map(|group| group.tabs.iter())
            .collect()
    }

    /// Returns the total number of tabs.
    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.groups.values().map(|group| group.tabs.len()).sum()
    }

    /// Returns the group holding a tab.
    #[must_use]
    pub fn group_of_tab(&self, tab_id: &TabId) -> Option<&GroupId> {
        self.groups
            .values()
            .find(|group| group.tab_index(tab_id).is_some())
            .map(|group| &group.id)
    }

    /// Finds a tab anywhere in the workspace.
    #[must_use]
    pub fn find_tab(&self, tab_id: &TabId) -> Option<&Tab> {
        self.groups.values().find_map(|group| group.tab(tab_id))
    }

    /// Finds a tab anywhere in the workspace, mutably.
    #[must_use]
    pub fn find_tab_mut(&mut self, tab_id: &TabId) -> Option<&mut Tab> {
        self.groups
            .values_mut()
            .find_map(|group| group.tab_mut(tab_id))
    }

    /// Finds the tab whose pane tree contains the pane.
    #[must_use]
    pub fn find_tab_by_pane(&self, pane_id: &PaneId) -> Option<&Tab> {
        self.groups
            .values()
            .flat_map(|group| group.tabs.iter())
            .find(|tab| tab.contains_pane(pane_id))
    }

    /// Finds the tab whose pane tree contains the pane, mutably.
    #[must_use]
    pub fn find_tab_by_pane_mut(&mut self, pane_id: &PaneId) -> Option<&mut Tab> {
        self.groups
            .values_mut()
            .flat_map(|group| group.tabs.iter_mut())
            .find(|tab| tab.contains_pane(pane_id))
    }

    /// Returns the settings tab and its group, if one is open.
    #[must_use]
    pub fn settings_tab(&self) -> Option<(&GroupId, &Tab)> {
        self.groups().into_iter().find_map(|group| {
            group
                .tabs
                .iter()
                .find(|tab| tab.is_settings())
                .map(|tab| (&group.id, tab))
        })
    }

    /// Returns a serializable copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            tree: self.tree.clone(),
            focused_group_id: self.focused_group_id.clone(),
            groups: self.groups().into_iter().cloned().collect(),
        }
    }

    // ========================================================================
    // Tab Operations
    // ========================================================================

    /// Appends a new tab to a group, activates it and focuses the group.
    ///
    /// A settings spec selects the existing settings tab instead when one is
    /// open, and the spec is discarded. Returns `None` if the group does not
    /// exist.
    pub fn add_tab_to_group(&mut self, group_id: &GroupId, spec: TabSpec) -> Option<Tab> {
        if !self.groups.contains_key(group_id) {
            tracing::debug!(group_id = %group_id, "add_tab_to_group: unknown group");
            return None;
        }
        if spec.kind == TabKind::Settings
            && let Some(existing) = self.select_existing_settings()
        {
            return Some(existing);
        }
        let group = self.groups.get_mut(group_id)?;
        let tab = Tab::from_spec(self.ids.tab_id(), spec);
        group.active_tab_id = Some(tab.id.clone());
        group.tabs.push(tab.clone());
        self.focused_group_id = group_id.clone();
        tracing::debug!(
            group_id = %group_id,
            tab_id = %tab.id,
            kind = %tab.kind,
            "Tab added"
        );
        Some(tab)
    }

    /// Appends a new tab to the focused group.
    ///
    /// The tab id is generated before the state changes, so the returned
    /// tab is always valid. A settings spec yields the existing settings tab
    /// when one is open.
    pub fn add_tab_to_focused_group(&mut self, spec: TabSpec) -> Tab {
        if spec.kind == TabKind::Settings
            && let Some(existing) = self.select_existing_settings()
        {
            return existing;
        }
        let tab = Tab::from_spec(self.ids.tab_id(), spec);
        if let Some(group) = self.groups.get_mut(&self.focused_group_id) {
            group.active_tab_id = Some(tab.id.clone());
            group.tabs.push(tab.clone());
            tracing::debug!(
                group_id = %self.focused_group_id,
                tab_id = %tab.id,
                kind = %tab.kind,
                "Tab added to focused group"
            );
        } else {
            tracing::warn!(
                group_id = %self.focused_group_id,
                "Focused group missing from group map"
            );
        }
        tab
    }

    /// Closes a tab wherever it lives.
    ///
    /// A group left empty is removed unless it is the last group, which
    /// survives empty. Returns the closed tab so the caller can release its
    /// sessions, or `None` if no tab matched.
    pub fn close_tab(&mut self, tab_id: &TabId) -> Option<Tab> {
        let Some(group_id) = self.group_of_tab(tab_id).cloned() else {
            tracing::debug!(tab_id = %tab_id, "close_tab: unknown tab");
            return None;
        };
        let group = self.groups.get_mut(&group_id)?;
        let tab = group.remove_tab(tab_id)?;
        let emptied = group.is_empty();
        tracing::debug!(
            group_id = %group_id,
            tab_id = %tab_id,
            "Tab closed"
        );
        if emptied {
            self.remove_group_unless_last(&group_id);
        }
        Some(tab)
    }

    /// Activates a tab and focuses its group.
    ///
    /// Returns false if the group does not hold the tab.
    pub fn select_tab(&mut self, group_id: &GroupId, tab_id: &TabId) -> bool {
        let Some(group) = self.groups.get_mut(group_id) else {
            return false;
        };
        if group.tab_index(tab_id).is_none() {
            tracing::debug!(
                group_id = %group_id,
                tab_id = %tab_id,
                "select_tab: tab not in group"
            );
            return false;
        }
        group.active_tab_id = Some(tab_id.clone());
        self.focused_group_id = group_id.clone();
        true
    }

    /// Renames a tab. Returns false if the tab does not exist.
    pub fn rename_tab(&mut self, tab_id: &TabId, title: impl Into<String>) -> bool {
        match self.find_tab_mut(tab_id) {
            Some(tab) => {
                tab.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Activates the settings tab, creating it in the focused group if none
    /// exists yet. Returns the settings tab id.
    pub fn open_settings(&mut self, title: &str) -> TabId {
        if let Some(existing) = self.select_existing_settings() {
            return existing.id;
        }
        let pane_id = self.ids.pane_id();
        let spec = TabSpec::single_pane(TabKind::Settings, title, Pane::pending(pane_id));
        self.add_tab_to_focused_group(spec).id
    }

    /// Selects the open settings tab, if any, and returns a copy of it.
    fn select_existing_settings(&mut self) -> Option<Tab> {
        let (group_id, tab) = self.settings_tab()?;
        let (group_id, tab) = (group_id.clone(), tab.clone());
        self.select_tab(&group_id, &tab.id);
        tracing::debug!(tab_id = %tab.id, "Settings tab reused");
        Some(tab)
    }

    /// Moves the focused group's active tab, wrapping at both ends.
    ///
    /// Returns false if the group has fewer than two tabs.
    pub fn cycle_focused_group_tab(&mut self, direction: CycleDirection) -> bool {
        let Some(group) = self.groups.get_mut(&self.focused_group_id) else {
            return false;
        };
        if group.tabs.len() <= 1 {
            return false;
        }
        let current = group
            .active_tab_id
            .as_ref()
            .and_then(|id| group.tab_index(id))
            .unwrap_or(0);
        let Some(next) = direction
            .step(current, group.tabs.len())
            .and_then(|index| group.tabs.get(index))
            .map(|tab| tab.id.clone())
        else {
            return false;
        };
        group.active_tab_id = Some(next);
        true
    }

    // ========================================================================
    // Group Operations
    // ========================================================================

    /// Splits the focused group, inserting and focusing a new empty group.
    ///
    /// Returns the new group's id.
    pub fn split_focused_group(&mut self, direction: SplitDirection) -> GroupId {
        let new_id = self.ids.group_id();
        let split_id = self.ids.split_id();
        let focused = self.focused_group_id.clone();
        if self
            .tree
            .split_leaf(&focused, direction, GroupLeaf::new(new_id.clone()), split_id)
        {
            self.groups
                .insert(new_id.clone(), PaneGroup::new(new_id.clone()));
            self.focused_group_id = new_id.clone();
            tracing::debug!(
                group_id = %new_id,
                %direction,
                "Group split"
            );
        } else {
            tracing::warn!(
                group_id = %focused,
                "Focused group missing from workspace tree"
            );
        }
        new_id
    }

    /// Closes a group and returns its tabs so the caller can release their
    /// sessions.
    ///
    /// The last group is never removed; it is emptied instead.
    pub fn close_group(&mut self, group_id: &GroupId) -> Vec<Tab> {
        let Some(group) = self.groups.get_mut(group_id) else {
            tracing::debug!(group_id = %group_id, "close_group: unknown group");
            return Vec::new();
        };
        let tabs = std::mem::take(&mut group.tabs);
        group.active_tab_id = None;
        self.remove_group_unless_last(group_id);
        tabs
    }

    /// Focuses a group. Returns false if it does not exist.
    pub fn focus_group(&mut self, group_id: &GroupId) -> bool {
        if self.groups.contains_key(group_id) {
            self.focused_group_id = group_id.clone();
            true
        } else {
            false
        }
    }

    /// Moves focus to the next or previous group in canonical order.
    ///
    /// Returns false if there is only one group.
    pub fn cycle_focused_pane_group(&mut self, direction: CycleDirection) -> bool {
        let ids = self.tree.leaf_ids();
        if ids.len() <= 1 {
            return false;
        }
        let current = ids
            .iter()
            .position(|id| id == &self.focused_group_id)
            .unwrap_or(0);
        match direction.step(current, ids.len()).and_then(|i| ids.get(i)) {
            Some(next) => {
                self.focused_group_id = next.clone();
                true
            }
            None => false,
        }
    }

    /// Replaces the sizes of a workspace split. Values are not validated.
    pub fn resize_split_node(&mut self, split_id: &SplitId, sizes: Vec<f64>) -> bool {
        self.tree.resize_split(split_id, sizes)
    }

    fn remove_group_unless_last(&mut self, group_id: &GroupId) {
        match self.tree.remove_leaf(group_id) {
            RemoveResult::Removed(_) => {
                self.groups.remove(group_id);
                if &self.focused_group_id == group_id
                    && let Some(first) = self.tree.first_leaf()
                {
                    self.focused_group_id = first.id.clone();
                }
                tracing::debug!(group_id = %group_id, "Group removed");
            }
            RemoveResult::RemovedSelf => {
                tracing::debug!(
                    group_id = %group_id,
                    "Last group kept alive empty"
                );
            }
            RemoveResult::NotFound => {
                tracing::warn!(
                    group_id = %group_id,
                    "Group missing from workspace tree"
                );
            }
        }
    }
}
