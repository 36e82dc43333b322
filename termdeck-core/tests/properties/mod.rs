//! Property-based tests for `termdeck-core`

mod coordinator_tests;
mod split_tree_tests;
mod workspace_tests;
