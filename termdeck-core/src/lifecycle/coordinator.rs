//! Session coordinator
//!
//! Wraps the [`Workspace`] and keeps backend sessions in lockstep with pane
//! leaves: binding a pane queues a create intent when the core owns the
//! session, and every binding that leaves the layout queues a destroy
//! intent and notifies the registered observers.
//!
//! # Pane binding protocol
//!
//! Splitting a pane is purely structural and inserts a pending pane. The
//! pending pane is later bound through one of the `replace_pending_with_*`
//! calls once the user has chosen a session type. Settings tabs host a
//! single pending pane that is never split or bound.

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::TabSettings;
use crate::dispatch::{IntentSender, SessionIntent, SessionObserver};
use crate::id::{GroupId, PaneId, SessionId, SplitId, TabId};
use crate::pane::{Pane, PaneTree, SessionBinding, preferred_focus, released_sessions};
use crate::split::{CycleDirection, RemoveResult, SplitDirection};
use crate::tracing::span_names;
use crate::workspace::{Tab, TabKind, TabSpec, Workspace};

/// Result of [`SessionCoordinator::close_pane_by_id`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClosePaneResult {
    /// No tab contains the pane
    NotFound,
    /// The pane was removed and its tab survives
    PaneRemoved {
        /// Bindings that left the layout, each torn down once
        released: Vec<SessionBinding>,
    },
    /// The pane was the last of its tab, so the whole tab was closed
    TabClosed(Tab),
}

/// Binds pane leaves to backend sessions.
pub struct SessionCoordinator {
    workspace: Workspace,
    intents: IntentSender,
    observers: Vec<Arc<dyn SessionObserver>>,
    tab_settings: TabSettings,
}

impl std::fmt::Debug for SessionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCoordinator")
            .field("workspace", &self.workspace)
            .field("observers", &self.observers.len())
            .field("tab_settings", &self.tab_settings)
            .finish_non_exhaustive()
    }
}

impl SessionCoordinator {
    /// Creates a coordinator over a fresh workspace.
    #[must_use]
    pub fn new(intents: IntentSender) -> Self {
        Self::with_workspace(Workspace::new(), intents)
    }

    /// Creates a coordinator over an existing workspace.
    #[must_use]
    pub fn with_workspace(workspace: Workspace, intents: IntentSender) -> Self {
        Self {
            workspace,
            intents,
            observers: Vec::new(),
            tab_settings: TabSettings::default(),
        }
    }

    /// Uses the given titles for tabs the coordinator creates.
    #[must_use]
    pub fn with_tab_settings(mut self, tab_settings: TabSettings) -> Self {
        self.tab_settings = tab_settings;
        self
    }

    /// Registers an observer notified of every session teardown.
    pub fn add_observer(&mut self, observer: Arc<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Returns the workspace.
    #[must_use]
    pub const fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Returns the active tab of the focused group.
    #[must_use]
    pub fn active_tab(&self) -> Option<&Tab> {
        self.workspace.active_tab()
    }

    // ========================================================================
    // Tab Lifecycle
    // ========================================================================

    /// Opens a local shell tab in the focused group.
    ///
    /// The tab exists as soon as this returns; the pty session is created
    /// asynchronously and a failure is only reported on the event channel.
    pub fn create_local_tab(&mut self) -> Tab {
        let ids = self.workspace.ids();
        let session_id = ids.session_id();
        let pane = Pane::terminal(ids.pane_id(), session_id.clone());
        let spec = TabSpec::single_pane(TabKind::Local, &self.tab_settings.local_title, pane);
        let tab = self.workspace.add_tab_to_focused_group(spec);
        self.intents.send(SessionIntent::CreatePty { session_id });
        tab
    }

    /// Opens a remote shell tab for a session created upstream.
    pub fn open_ssh_tab(&mut self, pty_session_id: SessionId, title: impl Into<String>) -> Tab {
        let pane = Pane::terminal(self.workspace.ids().pane_id(), pty_session_id);
        self.workspace
            .add_tab_to_focused_group(TabSpec::single_pane(TabKind::Ssh, title, pane))
    }

    /// Opens a file browser tab for an SFTP session created upstream.
    pub fn open_sftp_tab(&mut self, sftp_session_id: SessionId, title: impl Into<String>) -> Tab {
        let pane = Pane::sftp(self.workspace.ids().pane_id(), sftp_session_id);
        self.workspace
            .add_tab_to_focused_group(TabSpec::single_pane(TabKind::Sftp, title, pane))
    }

    /// Activates the settings tab, creating it if needed.
    pub fn open_settings(&mut self) -> TabId {
        self.workspace
            .open_settings(&self.tab_settings.settings_title)
    }

    /// Closes a tab after tearing down every session bound in its panes.
    pub fn close_tab(&mut self, tab_id: &TabId) -> Option<Tab> {
        let bindings = self.workspace.find_tab(tab_id)?.bound_sessions();
        self.release(&bindings);
        self.workspace.close_tab(tab_id)
    }

    /// Closes a group and tears down the sessions of all its tabs.
    ///
    /// The last group survives empty.
    pub fn close_group(&mut self, group_id: &GroupId) -> Vec<Tab> {
        let tabs = self.workspace.close_group(group_id);
        for tab in &tabs {
            self.release(&tab.bound_sessions());
        }
        tabs
    }

    /// Activates a tab and focuses its group.
    pub fn select_tab(&mut self, group_id: &GroupId, tab_id: &TabId) -> bool {
        self.workspace.select_tab(group_id, tab_id)
    }

    /// Renames a tab.
    pub fn rename_tab(&mut self, tab_id: &TabId, title: impl Into<String>) -> bool {
        self.workspace.rename_tab(tab_id, title)
    }

    /// Cycles the focused group's active tab.
    pub fn cycle_focused_group_tab(&mut self, direction: CycleDirection) -> bool {
        self.workspace.cycle_focused_group_tab(direction)
    }

    // ========================================================================
    // Group Layout
    // ========================================================================

    /// Splits the focused group and focuses the new empty group.
    pub fn split_focused_group(&mut self, direction: SplitDirection) -> GroupId {
        self.workspace.split_focused_group(direction)
    }

    /// Focuses a group.
    pub fn focus_group(&mut self, group_id: &GroupId) -> bool {
        self.workspace.focus_group(group_id)
    }

    /// Cycles group focus in canonical order.
    pub fn cycle_focused_pane_group(&mut self, direction: CycleDirection) -> bool {
        self.workspace.cycle_focused_pane_group(direction)
    }

    /// Resizes a workspace split.
    pub fn resize_split_node(&mut self, split_id: &SplitId, sizes: Vec<f64>) -> bool {
        self.workspace.resize_split_node(split_id, sizes)
    }

    // ========================================================================
    // Pane Layout
    // ========================================================================

    /// Splits a pane, inserting and focusing a new pending pane.
    ///
    /// Targets the active tab's focused pane when `pane_id` is `None`.
    /// Returns the new pane id, or `None` if the target does not exist or
    /// lives in the settings tab.
    pub fn split_pane(
        &mut self,
        direction: SplitDirection,
        pane_id: Option<&PaneId>,
    ) -> Option<PaneId> {
        let target = match pane_id {
            Some(id) => id.clone(),
            None => self.workspace.active_tab()?.focused_pane_id.clone(),
        };
        if self.workspace.find_tab_by_pane(&target)?.is_settings() {
            tracing::debug!(pane_id = %target, "split_pane: settings tab is not splittable");
            return None;
        }

        let ids = self.workspace.ids();
        let (new_pane, split_id) = (ids.pane_id(), ids.split_id());
        let tab = self.workspace.find_tab_by_pane_mut(&target)?;
        if !tab
            .pane_tree
            .split_leaf(&target, direction, Pane::pending(new_pane.clone()), split_id)
        {
            return None;
        }
        tab.focused_pane_id = new_pane.clone();
        tracing::debug!(
            tab_id = %tab.id,
            pane_id = %target,
            new_pane_id = %new_pane,
            %direction,
            "Pane split"
        );
        Some(new_pane)
    }

    /// Closes a pane and tears down exactly the sessions that left its tab.
    ///
    /// Closing the last pane of a tab closes the tab. If the closed pane
    /// held focus, focus moves to the first terminal, else the first file
    /// browser, else the first pending pane.
    pub fn close_pane_by_id(&mut self, pane_id: &PaneId) -> ClosePaneResult {
        let Some(tab) = self.workspace.find_tab_by_pane(pane_id) else {
            tracing::debug!(pane_id = %pane_id, "close_pane_by_id: unknown pane");
            return ClosePaneResult::NotFound;
        };
        if tab.pane_count() <= 1 {
            let tab_id = tab.id.clone();
            return self
                .close_tab(&tab_id)
                .map_or(ClosePaneResult::NotFound, ClosePaneResult::TabClosed);
        }

        let Some(tab) = self.workspace.find_tab_by_pane_mut(pane_id) else {
            return ClosePaneResult::NotFound;
        };
        let before = tab.pane_tree.clone();
        if !matches!(tab.pane_tree.remove_leaf(pane_id), RemoveResult::Removed(_)) {
            return ClosePaneResult::NotFound;
        }
        if &tab.focused_pane_id == pane_id
            && let Some(next) = preferred_focus(&tab.pane_tree)
        {
            tab.focused_pane_id = next;
        }
        let released = released_sessions(&before, &tab.pane_tree);
        tracing::debug!(
            tab_id = %tab.id,
            pane_id = %pane_id,
            released = released.len(),
            "Pane closed"
        );

        self.release(&released);
        ClosePaneResult::PaneRemoved { released }
    }

    /// Focuses a pane, bringing its tab and group forward.
    pub fn focus_pane(&mut self, pane_id: &PaneId) -> bool {
        let Some(tab) = self.workspace.find_tab_by_pane_mut(pane_id) else {
            return false;
        };
        tab.focused_pane_id = pane_id.clone();
        let tab_id = tab.id.clone();
        if let Some(group_id) = self.workspace.group_of_tab(&tab_id).cloned() {
            self.workspace.select_tab(&group_id, &tab_id);
        }
        true
    }

    /// Moves pane focus within the active tab in canonical order.
    pub fn cycle_focused_pane(&mut self, direction: CycleDirection) -> bool {
        let Some(tab) = self.workspace.active_tab_mut() else {
            return false;
        };
        let ids = tab.pane_tree.leaf_ids();
        if ids.len() <= 1 {
            return false;
        }
        let current = ids
            .iter()
            .position(|id| id == &tab.focused_pane_id)
            .unwrap_or(0);
        match direction.step(current, ids.len()).and_then(|i| ids.get(i)) {
            Some(next) => {
                tab.focused_pane_id = next.clone();
                true
            }
            None => false,
        }
    }

    /// Replaces the active tab's pane tree wholesale.
    ///
    /// Bindings missing from the new tree are torn down. Sessions appearing
    /// only in the new tree are adopted as-is. A tree without panes, with a
    /// repeated pane id, or reusing a pane id from another tab is rejected.
    /// Returns the released bindings.
    pub fn update_pane_tree(&mut self, tree: PaneTree) -> Vec<SessionBinding> {
        if tree.leaf_count() == 0 || !tree.is_well_formed() {
            tracing::warn!("update_pane_tree: rejected malformed pane tree");
            return Vec::new();
        }
        let Some(active_id) = self.workspace.active_tab().map(|tab| tab.id.clone()) else {
            return Vec::new();
        };
        if !self.pane_ids_are_free(&tree, &active_id) {
            tracing::warn!(tab_id = %active_id, "update_pane_tree: rejected conflicting pane ids");
            return Vec::new();
        }
        let Some(tab) = self.workspace.active_tab_mut() else {
            return Vec::new();
        };
        if tab.is_settings() {
            return Vec::new();
        }
        let before = std::mem::replace(&mut tab.pane_tree, tree);
        if !tab.contains_pane(&tab.focused_pane_id)
            && let Some(next) = preferred_focus(&tab.pane_tree)
        {
            tab.focused_pane_id = next;
        }
        let released = released_sessions(&before, &tab.pane_tree);
        self.release(&released);
        released
    }

    /// Resizes a split inside the active tab's pane tree.
    pub fn resize_pane_split(&mut self, split_id: &SplitId, sizes: Vec<f64>) -> bool {
        self.workspace
            .active_tab_mut()
            .is_some_and(|tab| tab.pane_tree.resize_split(split_id, sizes))
    }

    // ========================================================================
    // Pending Pane Binding
    // ========================================================================

    /// Binds a pending pane to a freshly generated local pty session.
    ///
    /// Returns the new session id, or `None` if the pane is not pending.
    pub fn replace_pending_with_local(&mut self, pending_pane_id: &PaneId) -> Option<SessionId> {
        if !self.is_bindable(pending_pane_id) {
            return None;
        }
        let session_id = self.workspace.ids().session_id();
        if !self.bind_pending(pending_pane_id, SessionBinding::Pty(session_id.clone())) {
            return None;
        }
        self.intents.send(SessionIntent::CreatePty {
            session_id: session_id.clone(),
        });
        Some(session_id)
    }

    /// Binds a pending pane to an SFTP session created upstream.
    pub fn replace_pending_with_sftp_pane(
        &mut self,
        pending_pane_id: &PaneId,
        sftp_session_id: SessionId,
    ) -> bool {
        self.is_bindable(pending_pane_id)
            && self.bind_pending(pending_pane_id, SessionBinding::Sftp(sftp_session_id))
    }

    /// Binds a pending pane to a remote shell session created upstream.
    pub fn replace_pending_with_ssh(
        &mut self,
        pending_pane_id: &PaneId,
        pty_session_id: SessionId,
    ) -> bool {
        self.is_bindable(pending_pane_id)
            && self.bind_pending(pending_pane_id, SessionBinding::Pty(pty_session_id))
    }

    fn is_bindable(&self, pane_id: &PaneId) -> bool {
        self.workspace.find_tab_by_pane(pane_id).is_some_and(|tab| {
            !tab.is_settings()
                && tab
                    .pane_tree
                    .find_leaf(pane_id)
                    .is_some_and(Pane::is_pending)
        })
    }

    fn bind_pending(&mut self, pane_id: &PaneId, binding: SessionBinding) -> bool {
        let Some(tab) = self.workspace.find_tab_by_pane_mut(pane_id) else {
            return false;
        };
        let bound = tab
            .pane_tree
            .find_leaf_mut(pane_id)
            .is_some_and(|pane| pane.bind(binding));
        if bound {
            tab.focused_pane_id = pane_id.clone();
            tracing::debug!(tab_id = %tab.id, pane_id = %pane_id, "Pending pane bound");
        }
        bound
    }

    /// True when every pane id in `tree` is distinct and not owned by a
    /// tab other than `tab_id`.
    fn pane_ids_are_free(&self, tree: &PaneTree, tab_id: &TabId) -> bool {
        let mut seen = HashSet::new();
        tree.leaf_ids().into_iter().all(|pane_id| {
            let owned_elsewhere = self
                .workspace
                .find_tab_by_pane(&pane_id)
                .is_some_and(|tab| &tab.id != tab_id);
            !owned_elsewhere && seen.insert(pane_id)
        })
    }

    fn release(&self, bindings: &[SessionBinding]) {
        if bindings.is_empty() {
            return;
        }
        let _span = crate::trace_operation_debug!(
            span_names::SESSION_TEARDOWN,
            count = bindings.len()
        )
        .entered();
        for binding in bindings {
            for observer in &self.observers {
                observer.on_session_disconnected(binding.session_id());
            }
            self.intents.send(SessionIntent::release(binding.clone()));
        }
    }
}
