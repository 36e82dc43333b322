//! Split-tree algebra
//!
//! This module provides the generic n-ary layout tree shared by the
//! workspace (whose leaves are tab groups) and by every tab's pane layout
//! (whose leaves are panes).
//!
//! # Architecture
//!
//! - **One algebra, two trees**: the tree is parameterized only by its leaf
//!   payload through the [`LayoutLeaf`] trait
//! - **Percentage sizes**: every split carries one size per child
//! - **Canonical order**: pre-order, depth-first, left-to-right leaf order
//!   drives focus cycling and fallback focus
//!
//! # Module Structure
//!
//! - `types` - Direction enums (`SplitDirection`, `CycleDirection`)
//! - `tree` - Layout tree (`LayoutNode`, `SplitNode`, `RemoveResult`)
//!
//! # Example
//!
//! ```
//! use termdeck_core::id::IdGenerator;
//! use termdeck_core::pane::{Pane, PaneTree};
//! use termdeck_core::split::SplitDirection;
//!
//! let ids = IdGenerator::new();
//! let first = ids.pane_id();
//! let mut tree = PaneTree::leaf(Pane::pending(first.clone()));
//!
//! let second = ids.pane_id();
//! assert!(tree.split_leaf(&first, SplitDirection::Vertical, Pane::pending(second.clone()), ids.split_id()));
//! assert_eq!(tree.leaf_ids(), vec![first.clone(), second.clone()]);
//!
//! // Closing one half collapses the split back into a single leaf
//! let tree = tree.close_leaf(&second).unwrap();
//! assert!(tree.is_leaf());
//! ```

mod tree;
mod types;

pub use tree::{
    DEFAULT_SPLIT_SIZES, FULL_SIZE, LayoutLeaf, LayoutNode, RemoveResult, SplitNode, even_sizes,
};
pub use types::{CycleDirection, SplitDirection};
