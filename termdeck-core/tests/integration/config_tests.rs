//! Settings feeding the coordinator and the keybinding table

use termdeck_core::command::WorkspaceCommand;
use termdeck_core::config::{ConfigManager, default_keybindings};
use termdeck_core::dispatch::intent_channel;
use termdeck_core::lifecycle::SessionCoordinator;
use tempfile::TempDir;

#[test]
fn saved_titles_reach_new_tabs() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::new(dir.path());
    let mut settings = manager.load_settings().unwrap();
    settings.tabs.local_title = "bash".to_string();
    manager.save_settings(&settings).unwrap();

    let loaded = manager.load_settings().unwrap();
    let (tx, _rx) = intent_channel();
    let mut coordinator = SessionCoordinator::new(tx).with_tab_settings(loaded.tabs);

    assert_eq!(coordinator.create_local_tab().title, "bash");
}

#[test]
fn every_keybinding_drives_the_coordinator() {
    let (tx, _rx) = intent_channel();
    let mut coordinator = SessionCoordinator::new(tx);
    coordinator.apply(&WorkspaceCommand::NewLocalTab);

    for def in default_keybindings() {
        let command = def.command().unwrap();
        coordinator.apply(&command);
    }

    assert!(coordinator.workspace().group_count() >= 1);
}
