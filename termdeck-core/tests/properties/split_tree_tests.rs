//! Property-based tests for the split-tree algebra
//!
//! Trees are grown from a single pane by a random sequence of splits, each
//! targeting a leaf chosen by index, so every generated tree is reachable
//! through the public API.

use proptest::prelude::*;
use termdeck_core::id::{IdGenerator, PaneId};
use termdeck_core::pane::{Pane, PaneTree};
use termdeck_core::split::{LayoutNode, RemoveResult, SplitDirection};

// ============================================================================
// Test Strategies
// ============================================================================

fn split_direction_strategy() -> impl Strategy<Value = SplitDirection> {
    prop_oneof![
        Just(SplitDirection::Horizontal),
        Just(SplitDirection::Vertical),
    ]
}

/// Sequence of (leaf index, direction) split steps
fn growth_strategy(max_ops: usize) -> impl Strategy<Value = Vec<(usize, SplitDirection)>> {
    proptest::collection::vec((0usize..16, split_direction_strategy()), 0..=max_ops)
}

fn grow(ids: &IdGenerator, steps: &[(usize, SplitDirection)]) -> PaneTree {
    let mut tree = PaneTree::leaf(Pane::pending(ids.pane_id()));
    for (index, direction) in steps {
        let leaves = tree.leaf_ids();
        let target = &leaves[index % leaves.len()];
        tree.split_leaf(target, *direction, Pane::pending(ids.pane_id()), ids.split_id());
    }
    tree
}

fn pick(tree: &PaneTree, index: usize) -> PaneId {
    let leaves = tree.leaf_ids();
    leaves[index % leaves.len()].clone()
}

/// Every split has at least two children and one size per child.
fn assert_collapsed<L>(node: &LayoutNode<L>) {
    if let LayoutNode::Split(split) = node {
        assert!(split.children.len() >= 2, "split {} under-filled", split.id);
        assert_eq!(split.sizes.len(), split.children.len());
        for child in &split.children {
            assert_collapsed(child);
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn close_undoes_split(
        steps in growth_strategy(12),
        index in 0usize..16,
        direction in split_direction_strategy(),
    ) {
        let ids = IdGenerator::new();
        let tree = grow(&ids, &steps);
        let target = pick(&tree, index);
        let new_pane = ids.pane_id();

        let mut split = tree.clone();
        prop_assert!(split.split_leaf(&target, direction, Pane::pending(new_pane.clone()), ids.split_id()));
        let restored = split.close_leaf(&new_pane);

        prop_assert_eq!(restored, Some(tree));
    }

    #[test]
    fn split_adds_exactly_one_leaf(
        steps in growth_strategy(12),
        index in 0usize..16,
        direction in split_direction_strategy(),
    ) {
        let ids = IdGenerator::new();
        let mut tree = grow(&ids, &steps);
        let before = tree.leaf_count();
        let target = pick(&tree, index);

        tree.split_leaf(&target, direction, Pane::pending(ids.pane_id()), ids.split_id());

        prop_assert_eq!(tree.leaf_count(), before + 1);
        assert_collapsed(&tree);
    }

    #[test]
    fn close_removes_exactly_one_leaf(steps in growth_strategy(12), index in 0usize..16) {
        let ids = IdGenerator::new();
        let tree = grow(&ids, &steps);
        let before = tree.leaf_count();
        let target = pick(&tree, index);

        match tree.close_leaf(&target) {
            Some(rest) => {
                prop_assert!(before >= 2);
                prop_assert_eq!(rest.leaf_count(), before - 1);
                prop_assert!(!rest.contains_leaf(&target));
                assert_collapsed(&rest);
            }
            None => prop_assert_eq!(before, 1),
        }
    }

    #[test]
    fn closing_until_empty_keeps_shape_valid(steps in growth_strategy(10), order in proptest::collection::vec(0usize..16, 0..=12)) {
        let ids = IdGenerator::new();
        let mut tree = grow(&ids, &steps);

        for index in order {
            if tree.leaf_count() == 1 {
                let last = pick(&tree, 0);
                prop_assert!(matches!(tree.remove_leaf(&last), RemoveResult::RemovedSelf));
                break;
            }
            let target = pick(&tree, index);
            prop_assert!(tree.remove_leaf(&target).is_removed());
            prop_assert!(tree.is_well_formed());
            assert_collapsed(&tree);
        }
    }

    #[test]
    fn unknown_leaf_is_absorbed(steps in growth_strategy(8)) {
        let ids = IdGenerator::new();
        let mut tree = grow(&ids, &steps);
        let before = tree.clone();
        let ghost = PaneId::from_raw("ghost");

        prop_assert!(matches!(tree.remove_leaf(&ghost), RemoveResult::NotFound));
        prop_assert!(!tree.split_leaf(&ghost, SplitDirection::Vertical, Pane::pending(ids.pane_id()), ids.split_id()));
        prop_assert_eq!(tree, before);
    }

    #[test]
    fn leaf_ids_stay_unique(steps in growth_strategy(16)) {
        let ids = IdGenerator::new();
        let tree = grow(&ids, &steps);
        let leaves = tree.leaf_ids();
        let unique: std::collections::HashSet<_> = leaves.iter().collect();
        prop_assert_eq!(unique.len(), leaves.len());
        prop_assert_eq!(tree.split_count(), steps.len());
    }

    #[test]
    fn pane_tree_serde_preserves_structure(steps in growth_strategy(6)) {
        let ids = IdGenerator::new();
        let tree = grow(&ids, &steps);
        let json = serde_json::to_string(&tree).unwrap();
        let parsed: PaneTree = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, tree);
    }
}
