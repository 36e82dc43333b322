//! Tabs, tab groups and the workspace leaf type

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{GroupId, PaneId, SessionId, TabId};
use crate::pane::{Pane, PaneTree, SessionBinding, bound_sessions};
use crate::split::{LayoutLeaf, LayoutNode};

/// Layout tree of the whole workspace.
pub type WorkspaceTree = LayoutNode<GroupLeaf>;

/// Leaf of the workspace tree, naming a [`PaneGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupLeaf {
    /// Group this leaf stands for
    pub id: GroupId,
}

impl GroupLeaf {
    /// Creates a leaf for the given group.
    #[must_use]
    pub const fn new(id: GroupId) -> Self {
        Self { id }
    }
}

impl LayoutLeaf for GroupLeaf {
    type Id = GroupId;

    fn leaf_id(&self) -> &GroupId {
        &self.id
    }
}

/// What a tab hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKind {
    /// Local shell
    Local,
    /// Remote shell
    Ssh,
    /// File browser
    Sftp,
    /// Settings surface (at most one per workspace)
    Settings,
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Ssh => write!(f, "ssh"),
            Self::Sftp => write!(f, "sftp"),
            Self::Settings => write!(f, "settings"),
        }
    }
}

/// Everything needed to create a tab except its id.
#[derive(Debug, Clone, PartialEq)]
pub struct TabSpec {
    /// Tab kind
    pub kind: TabKind,
    /// Session the tab was opened for
    pub session_id: Option<SessionId>,
    /// Display title
    pub title: String,
    /// Initial pane layout
    pub pane_tree: PaneTree,
    /// Initially focused pane
    pub focused_pane_id: PaneId,
}

impl TabSpec {
    /// Creates a tab whose layout is a single pane.
    #[must_use]
    pub fn single_pane(kind: TabKind, title: impl Into<String>, pane: Pane) -> Self {
        let session_id = pane.binding().map(|binding| binding.session_id().clone());
        let focused_pane_id = pane.id().clone();
        Self {
            kind,
            session_id,
            title: title.into(),
            pane_tree: PaneTree::leaf(pane),
            focused_pane_id,
        }
    }
}

/// A typed unit of work with its own pane layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    /// Tab id
    pub id: TabId,
    /// Tab kind
    pub kind: TabKind,
    /// Session the tab was opened for
    pub session_id: Option<SessionId>,
    /// Display title
    pub title: String,
    /// Pane layout, never empty
    pub pane_tree: PaneTree,
    /// Focused pane, always present in `pane_tree`
    pub focused_pane_id: PaneId,
}

impl Tab {
    /// Creates a tab from its spec.
    #[must_use]
    pub fn from_spec(id: TabId, spec: TabSpec) -> Self {
        Self {
            id,
            kind: spec.kind,
            session_id: spec.session_id,
            title: spec.title,
            pane_tree: spec.pane_tree,
            focused_pane_id: spec.focused_pane_id,
        }
    }

    /// Returns the number of panes.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.pane_tree.leaf_count()
    }

    /// Returns true if the tab contains the pane.
    #[must_use]
    pub fn contains_pane(&self, pane_id: &PaneId) -> bool {
        self.pane_tree.contains_leaf(pane_id)
    }

    /// Returns the focused pane.
    #[must_use]
    pub fn focused_pane(&self) -> Option<&Pane> {
        self.pane_tree.find_leaf(&self.focused_pane_id)
    }

    /// Returns every session bound in the tab's panes.
    #[must_use]
    pub fn bound_sessions(&self) -> Vec<SessionBinding> {
        bound_sessions(&self.pane_tree)
    }

    /// Returns true for the settings tab.
    #[must_use]
    pub fn is_settings(&self) -> bool {
        self.kind == TabKind::Settings
    }
}

/// A leaf container of tabs with one active tab.
///
/// `active_tab_id` is `None` exactly when `tabs` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneGroup {
    /// Group id
    pub id: GroupId,
    /// Tabs in display order
    pub tabs: Vec<Tab>,
    /// Active tab
    pub active_tab_id: Option<TabId>,
}

impl PaneGroup {
    /// Creates an empty group.
    #[must_use]
    pub const fn new(id: GroupId) -> Self {
        Self {
            id,
            tabs: Vec::new(),
            active_tab_id: None,
        }
    }

    /// Returns true if the group has no tabs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Returns the index of a tab in display order.
    #[must_use]
    pub fn tab_index(&self, tab_id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| &tab.id == tab_id)
    }

    /// Returns the tab with the given id.
    #[must_use]
    pub fn tab(&self, tab_id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| &tab.id == tab_id)
    }

    /// Returns the tab with the given id mutably.
    #[must_use]
    pub fn tab_mut(&mut self, tab_id: &TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| &tab.id == tab_id)
    }

    /// Returns the active tab.
    #[must_use]
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.as_ref().and_then(|id| self.tab(id))
    }

    /// Returns the active tab mutably.
    #[must_use]
    pub fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        let id = self.active_tab_id.clone()?;
        self.tab_mut(&id)
    }

    /// Removes a tab, re-pointing the active tab if needed.
    ///
    /// When the active tab is removed the tab that slides into its index
    /// becomes active, or the new last tab if it was at the end.
    pub(crate) fn remove_tab(&mut self, tab_id: &TabId) -> Option<Tab> {
        let index = self.tab_index(tab_id)?;
        let tab = self.tabs.remove(index);
        if self.active_tab_id.as_ref() == Some(&tab.id) {
            self.active_tab_id = self
                .tabs
                .len()
                .checked_sub(1)
                .and_then(|last| self.tabs.get(index.min(last)))
                .map(|next| next.id.clone());
        }
        Some(tab)
    }
}
