//! Identifier types and generation
//!
//! Every structural element of the workspace (splits, groups, tabs, panes)
//! and every backend session is named by an opaque string identifier.
//! Identifiers are produced by an [`IdGenerator`] owned by the controller
//! that creates the element, so two workspaces (or two tests) never share
//! counter state.
//!
//! Generated identifiers have the shape
//! `<prefix>-<millis:013x>-<counter:08x>-<nonce:08x>` which sorts lexically
//! in creation order for a single generator.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier string.
            #[must_use]
            pub fn from_raw(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a split node in either layout tree.
    SplitId
);

string_id!(
    /// Identifier of a tab group (a leaf of the workspace tree).
    GroupId
);

string_id!(
    /// Identifier of a tab.
    TabId
);

string_id!(
    /// Identifier of a pane (a leaf of a tab's pane tree).
    PaneId
);

string_id!(
    /// Opaque identifier of a backend session (pseudo-terminal, SSH shell
    /// or SFTP channel).
    ///
    /// Sessions are owned by the backend process; the core only stores
    /// their ids in pane leaves.
    SessionId
);

/// Prefixes used for each identifier family.
pub mod prefixes {
    /// Split node prefix
    pub const SPLIT: &str = "split";
    /// Group prefix
    pub const GROUP: &str = "group";
    /// Tab prefix
    pub const TAB: &str = "tab";
    /// Pane prefix
    pub const PANE: &str = "pane";
    /// Locally generated pty session prefix
    pub const PTY_SESSION: &str = "pty";
}

/// Produces collision-resistant, sortable identifiers.
///
/// Combines a wall-clock timestamp (clamped so it never runs backwards),
/// a per-generator monotonic counter and a random nonce.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicU64,
    last_millis: AtomicU64,
}

impl IdGenerator {
    /// Creates a generator with a fresh counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many identifiers this generator has issued.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    /// Generates a split node id.
    #[must_use]
    pub fn split_id(&self) -> SplitId {
        SplitId(self.next_raw(prefixes::SPLIT))
    }

    /// Generates a group id.
    #[must_use]
    pub fn group_id(&self) -> GroupId {
        GroupId(self.next_raw(prefixes::GROUP))
    }

    /// Generates a tab id.
    #[must_use]
    pub fn tab_id(&self) -> TabId {
        TabId(self.next_raw(prefixes::TAB))
    }

    /// Generates a pane id.
    #[must_use]
    pub fn pane_id(&self) -> PaneId {
        PaneId(self.next_raw(prefixes::PANE))
    }

    /// Generates an id for a locally spawned pty session.
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        SessionId(self.next_raw(prefixes::PTY_SESSION))
    }

    fn next_raw(&self, prefix: &str) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let millis = self.last_millis.fetch_max(now, Ordering::Relaxed).max(now);
        let nonce = (Uuid::new_v4().as_u128() >> 96) as u32;
        format!("{prefix}-{millis:013x}-{seq:08x}-{nonce:08x}")
    }
}

impl Clone for IdGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::Relaxed)),
            last_millis: AtomicU64::new(self.last_millis.load(Ordering::Relaxed)),
        }
    }
}
