//! Split tree structure shared by the workspace and pane layouts
//!
//! A layout is an n-ary tree where each node is either a leaf (carrying a
//! payload such as a tab group or a pane) or a split dividing its space
//! between two or more children along one axis.
//!
//! # Tree Structure
//!
//! ```text
//! Split(vertical, [50, 50])
//! ├── Leaf(A)
//! └── Split(horizontal, [33.3, 33.3, 33.3])
//!     ├── Leaf(B)
//!     ├── Leaf(C)
//!     └── Leaf(D)
//! ```
//!
//! Every operation that references an unknown id leaves the tree untouched
//! and reports it through its return value; none of them panic or error.
//!
//! Invariants maintained by every mutation:
//! - a split has at least two children;
//! - `sizes.len() == children.len()` for every split;
//! - whenever a split's child count changes, its sizes are reset to an
//!   even distribution.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::SplitDirection;
use crate::id::SplitId;

/// Sizes assigned to the two halves of a fresh split.
pub const DEFAULT_SPLIT_SIZES: [f64; 2] = [50.0, 50.0];

/// Total of a split's size vector.
pub const FULL_SIZE: f64 = 100.0;

/// Payload stored in the leaves of a layout tree.
pub trait LayoutLeaf {
    /// Identifier type of the leaf.
    type Id: Clone + Eq + fmt::Debug;

    /// Returns the leaf's identifier.
    fn leaf_id(&self) -> &Self::Id;
}

/// A node in a layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutNode<L> {
    /// An internal node dividing space among its children.
    Split(SplitNode<L>),
    /// A leaf carrying a payload.
    Leaf(L),
}

/// An internal node of a layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitNode<L> {
    /// Unique identifier for this split.
    pub id: SplitId,
    /// Axis along which the children are arranged.
    pub direction: SplitDirection,
    /// Child nodes in display order.
    pub children: Vec<LayoutNode<L>>,
    /// Percentage of space allocated to each child, same order as `children`.
    pub sizes: Vec<f64>,
}

/// Result of removing a leaf in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveResult<L> {
    /// No leaf with the given id exists in the tree.
    NotFound,
    /// The leaf was detached and the tree restructured; the tree still has
    /// at least one leaf.
    Removed(L),
    /// Removing the leaf would leave no tree at all. The tree is left
    /// untouched and the caller must destroy the whole container.
    RemovedSelf,
}

impl<L> RemoveResult<L> {
    /// Returns true if the leaf was found.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(_) | Self::RemovedSelf)
    }
}

/// Returns an even distribution of [`FULL_SIZE`] across `count` children.
#[must_use]
pub fn even_sizes(count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    vec![FULL_SIZE / count as f64; count]
}

impl<L> SplitNode<L> {
    /// Creates a split with evenly distributed sizes.
    #[must_use]
    pub fn new(id: SplitId, direction: SplitDirection, children: Vec<LayoutNode<L>>) -> Self {
        let sizes = even_sizes(children.len());
        Self {
            id,
            direction,
            children,
            sizes,
        }
    }
}

impl<L: LayoutLeaf> LayoutNode<L> {
    /// Creates a leaf node.
    #[must_use]
    pub const fn leaf(payload: L) -> Self {
        Self::Leaf(payload)
    }

    /// Creates a split node with evenly distributed sizes.
    #[must_use]
    pub fn split(id: SplitId, direction: SplitDirection, children: Vec<Self>) -> Self {
        Self::Split(SplitNode::new(id, direction, children))
    }

    /// Returns true if this is a leaf node.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns true if this is a split node.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        matches!(self, Self::Split(_))
    }

    /// Returns the payload if this is a leaf node.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&L> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Split(_) => None,
        }
    }

    /// Returns the split if this is a split node.
    #[must_use]
    pub const fn as_split(&self) -> Option<&SplitNode<L>> {
        match self {
            Self::Leaf(_) => None,
            Self::Split(split) => Some(split),
        }
    }

    // ========================================================================
    // Tree Traversal Methods
    // ========================================================================

    /// Finds a leaf by its id (depth-first).
    #[must_use]
    pub fn find_leaf(&self, id: &L::Id) -> Option<&L> {
        match self {
            Self::Leaf(leaf) => (leaf.leaf_id() == id).then_some(leaf),
            Self::Split(split) => split.children.iter().find_map(|child| child.find_leaf(id)),
        }
    }

    /// Finds a leaf by its id and returns a mutable reference.
    #[must_use]
    pub fn find_leaf_mut(&mut self, id: &L::Id) -> Option<&mut L> {
        match self {
            Self::Leaf(leaf) => (leaf.leaf_id() == id).then_some(leaf),
            Self::Split(split) => split
                .children
                .iter_mut()
                .find_map(|child| child.find_leaf_mut(id)),
        }
    }

    /// Returns true if the tree contains a leaf with the given id.
    #[must_use]
    pub fn contains_leaf(&self, id: &L::Id) -> bool {
        self.find_leaf(id).is_some()
    }

    /// Finds a split node by its id.
    #[must_use]
    pub fn find_split(&self, id: &SplitId) -> Option<&SplitNode<L>> {
        match self {
            Self::Leaf(_) => None,
            Self::Split(split) => {
                if &split.id == id {
                    return Some(split);
                }
                split.children.iter().find_map(|child| child.find_split(id))
            }
        }
    }

    fn find_split_mut(&mut self, id: &SplitId) -> Option<&mut SplitNode<L>> {
        match self {
            Self::Leaf(_) => None,
            Self::Split(split) => {
                if &split.id == id {
                    return Some(split);
                }
                split
                    .children
                    .iter_mut()
                    .find_map(|child| child.find_split_mut(id))
            }
        }
    }

    /// Returns all leaf ids in canonical order.
    ///
    /// Traverses the tree in pre-order (depth-first, left-to-right). This
    /// order drives every focus-cycling and fallback-focus decision.
    #[must_use]
    pub fn leaf_ids(&self) -> Vec<L::Id> {
        self.leaves()
            .into_iter()
            .map(|leaf| leaf.leaf_id().clone())
            .collect()
    }

    /// Returns all leaves in canonical order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&L> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a L>) {
        match self {
            Self::Leaf(leaf) => out.push(leaf),
            Self::Split(split) => {
                for child in &split.children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Returns the number of leaves in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Split(split) => split.children.iter().map(Self::leaf_count).sum(),
        }
    }

    /// Returns the number of split nodes in the tree.
    #[must_use]
    pub fn split_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Split(split) => 1 + split.children.iter().map(Self::split_count).sum::<usize>(),
        }
    }

    /// Returns the depth of the tree. A single leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Split(split) => 1 + split.children.iter().map(Self::depth).max().unwrap_or(0),
        }
    }

    /// Returns the first leaf in canonical order, if any.
    #[must_use]
    pub fn first_leaf(&self) -> Option<&L> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Split(split) => split.children.iter().find_map(Self::first_leaf),
        }
    }

    /// Checks the structural invariants of the whole tree.
    ///
    /// Returns false if any split has fewer than two children or a size
    /// vector whose length differs from its child count.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Leaf(_) => true,
            Self::Split(split) => {
                split.children.len() >= 2
                    && split.sizes.len() == split.children.len()
                    && split.children.iter().all(Self::is_well_formed)
            }
        }
    }

    // ========================================================================
    // Tree Mutation Methods
    // ========================================================================

    /// Splits the leaf with `target` in the given direction.
    ///
    /// The leaf is replaced by `Split { direction, [old, new_leaf], [50, 50] }`.
    /// Returns false (and leaves the tree untouched) if the target is not
    /// present.
    pub fn split_leaf(
        &mut self,
        target: &L::Id,
        direction: SplitDirection,
        new_leaf: L,
        split_id: SplitId,
    ) -> bool {
        let is_target = matches!(self, Self::Leaf(leaf) if leaf.leaf_id() == target);
        if is_target {
            let placeholder = Self::Split(SplitNode {
                id: split_id,
                direction,
                children: Vec::with_capacity(2),
                sizes: DEFAULT_SPLIT_SIZES.to_vec(),
            });
            let original = std::mem::replace(self, placeholder);
            if let Self::Split(split) = self {
                split.children.push(original);
                split.children.push(Self::Leaf(new_leaf));
            }
            return true;
        }

        match self {
            Self::Leaf(_) => false,
            Self::Split(split) => split
                .children
                .iter_mut()
                .find(|child| child.contains_leaf(target))
                .is_some_and(|child| child.split_leaf(target, direction, new_leaf, split_id)),
        }
    }

    /// Removes the leaf with `target` in place.
    ///
    /// Splits left with a single child collapse into that child; splits
    /// left with no children are removed from their parent. Any split whose
    /// child count changed gets even sizes.
    pub fn remove_leaf(&mut self, target: &L::Id) -> RemoveResult<L> {
        if let Self::Leaf(leaf) = self {
            return if leaf.leaf_id() == target {
                RemoveResult::RemovedSelf
            } else {
                RemoveResult::NotFound
            };
        }

        match self.detach(target) {
            None => RemoveResult::NotFound,
            Some(_) if self.is_empty_split() => RemoveResult::RemovedSelf,
            Some(leaf) => RemoveResult::Removed(leaf),
        }
    }

    /// Removes the leaf with `target`, consuming the tree.
    ///
    /// Returns `None` only when the tree collapses to nothing, i.e. the
    /// target was the sole remaining leaf. An unknown target returns the
    /// tree unchanged.
    #[must_use]
    pub fn close_leaf(mut self, target: &L::Id) -> Option<Self> {
        match self.remove_leaf(target) {
            RemoveResult::RemovedSelf => None,
            RemoveResult::NotFound | RemoveResult::Removed(_) => Some(self),
        }
    }

    /// Replaces the sizes of the split with `split_id`.
    ///
    /// The values are taken verbatim; they are not renormalized. A vector
    /// whose length differs from the split's child count is rejected so the
    /// length invariant can never be broken. Returns true if applied.
    pub fn resize_split(&mut self, split_id: &SplitId, sizes: Vec<f64>) -> bool {
        match self.find_split_mut(split_id) {
            Some(split) if split.children.len() == sizes.len() => {
                split.sizes = sizes;
                true
            }
            _ => false,
        }
    }

    fn is_empty_split(&self) -> bool {
        matches!(self, Self::Split(split) if split.children.is_empty())
    }

    /// Detaches the target from a split subtree and restores invariants.
    fn detach(&mut self, target: &L::Id) -> Option<L> {
        let Self::Split(split) = self else {
            return None;
        };
        let before = split.children.len();

        let direct = split
            .children
            .iter()
            .position(|child| matches!(child, Self::Leaf(leaf) if leaf.leaf_id() == target));

        let removed = if let Some(index) = direct {
            match split.children.remove(index) {
                Self::Leaf(leaf) => Some(leaf),
                Self::Split(_) => None,
            }
        } else {
            let nested = split
                .children
                .iter_mut()
                .find_map(|child| child.detach(target));
            split.children.retain(|child| !child.is_empty_split());
            nested
        };

        let leaf = removed?;
        match split.children.len() {
            0 => {}
            1 => {
                if let Some(only) = split.children.pop() {
                    *self = only;
                }
            }
            count if count != before => split.sizes = even_sizes(count),
            _ => {}
        }
        Some(leaf)
    }
}
