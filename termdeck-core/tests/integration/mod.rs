//! Integration tests for `termdeck-core`

mod config_tests;
mod lifecycle_dispatch_tests;
