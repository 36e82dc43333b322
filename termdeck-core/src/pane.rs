//! Pane leaves of a tab's layout
//!
//! A pane is either bound to a backend session (terminal or file browser)
//! or pending, i.e. structurally present but waiting for the user to pick a
//! session type. Binding is a one-way transition:
//!
//! ```text
//! Pending ──bind(Pty)──▶ Terminal
//!    └─────bind(Sftp)──▶ Sftp
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{PaneId, SessionId};
use crate::split::{LayoutLeaf, LayoutNode};

/// Layout tree of a single tab.
pub type PaneTree = LayoutNode<Pane>;

/// A leaf of a pane tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Pane {
    /// Terminal bound to a pseudo-terminal or remote shell session.
    Terminal {
        /// Pane id
        id: PaneId,
        /// Session rendering into this pane
        pty_session_id: SessionId,
    },
    /// File browser bound to an SFTP session.
    Sftp {
        /// Pane id
        id: PaneId,
        /// Session backing the browser
        sftp_session_id: SessionId,
    },
    /// Placeholder awaiting a session type.
    Pending {
        /// Pane id
        id: PaneId,
    },
}

/// Discriminant of [`Pane`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaneKind {
    /// Bound terminal
    Terminal,
    /// Bound file browser
    Sftp,
    /// Unbound placeholder
    Pending,
}

impl fmt::Display for PaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal => write!(f, "terminal"),
            Self::Sftp => write!(f, "sftp"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

/// A backend session a pane is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "protocol", content = "session_id", rename_all = "lowercase")]
pub enum SessionBinding {
    /// Pseudo-terminal or remote shell session
    Pty(SessionId),
    /// SFTP session
    Sftp(SessionId),
}

impl SessionBinding {
    /// Returns the bound session id.
    #[must_use]
    pub const fn session_id(&self) -> &SessionId {
        match self {
            Self::Pty(id) | Self::Sftp(id) => id,
        }
    }
}

impl fmt::Display for SessionBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pty(id) => write!(f, "pty:{id}"),
            Self::Sftp(id) => write!(f, "sftp:{id}"),
        }
    }
}

impl Pane {
    /// Creates a terminal pane.
    #[must_use]
    pub const fn terminal(id: PaneId, pty_session_id: SessionId) -> Self {
        Self::Terminal { id, pty_session_id }
    }

    /// Creates a file browser pane.
    #[must_use]
    pub const fn sftp(id: PaneId, sftp_session_id: SessionId) -> Self {
        Self::Sftp {
            id,
            sftp_session_id,
        }
    }

    /// Creates a pending pane.
    #[must_use]
    pub const fn pending(id: PaneId) -> Self {
        Self::Pending { id }
    }

    /// Returns the pane id.
    #[must_use]
    pub const fn id(&self) -> &PaneId {
        match self {
            Self::Terminal { id, .. } | Self::Sftp { id, .. } | Self::Pending { id } => id,
        }
    }

    /// Returns the pane kind.
    #[must_use]
    pub const fn kind(&self) -> PaneKind {
        match self {
            Self::Terminal { .. } => PaneKind::Terminal,
            Self::Sftp { .. } => PaneKind::Sftp,
            Self::Pending { .. } => PaneKind::Pending,
        }
    }

    /// Returns true if the pane is not bound to a session yet.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Returns the session binding, or `None` for a pending pane.
    #[must_use]
    pub fn binding(&self) -> Option<SessionBinding> {
        match self {
            Self::Terminal { pty_session_id, .. } => {
                Some(SessionBinding::Pty(pty_session_id.clone()))
            }
            Self::Sftp {
                sftp_session_id, ..
            } => Some(SessionBinding::Sftp(sftp_session_id.clone())),
            Self::Pending { .. } => None,
        }
    }

    /// Binds a pending pane to a session, keeping its id.
    ///
    /// Returns false and leaves the pane untouched if it is already bound.
    pub fn bind(&mut self, binding: SessionBinding) -> bool {
        let Self::Pending { id } = self else {
            return false;
        };
        let id = id.clone();
        *self = match binding {
            SessionBinding::Pty(session) => Self::terminal(id, session),
            SessionBinding::Sftp(session) => Self::sftp(id, session),
        };
        true
    }
}

impl LayoutLeaf for Pane {
    type Id = PaneId;

    fn leaf_id(&self) -> &PaneId {
        self.id()
    }
}

/// Returns every session bound in the tree, in canonical order.
///
/// Pending panes contribute nothing.
#[must_use]
pub fn bound_sessions(tree: &PaneTree) -> Vec<SessionBinding> {
    tree.leaves().into_iter().filter_map(Pane::binding).collect()
}

/// Returns the bindings present in `before` but missing from `after`,
/// preserving the order of `before`.
#[must_use]
pub fn released_sessions(before: &PaneTree, after: &PaneTree) -> Vec<SessionBinding> {
    let remaining: HashSet<SessionBinding> = bound_sessions(after).into_iter().collect();
    bound_sessions(before)
        .into_iter()
        .filter(|binding| !remaining.contains(binding))
        .collect()
}

/// Picks the pane that should receive focus when the current one is gone.
///
/// Prefers the first terminal in canonical order, then the first file
/// browser, then the first pending pane.
#[must_use]
pub fn preferred_focus(tree: &PaneTree) -> Option<PaneId> {
    let leaves = tree.leaves();
    [PaneKind::Terminal, PaneKind::Sftp, PaneKind::Pending]
        .into_iter()
        .find_map(|kind| leaves.iter().find(|pane| pane.kind() == kind))
        .map(|pane| pane.id().clone())
}
