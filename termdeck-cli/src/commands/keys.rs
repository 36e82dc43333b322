//! Keybinding listing command.

use std::fmt::Write as _;

use termdeck_core::config::{KeybindingCategory, KeybindingSettings, default_keybindings};

use crate::error::CliError;

/// Keys command handler
pub fn cmd_keys(keybindings: &KeybindingSettings) -> Result<(), CliError> {
    print!("{}", render_keys(keybindings));

    for (action, accel) in keybindings.invalid_overrides() {
        tracing::warn!(action, accel, "Ignoring invalid keybinding override");
        eprintln!("warning: invalid override {action} = {accel:?}");
    }
    Ok(())
}

/// Renders the keybinding table grouped by category.
///
/// Overridden bindings are marked with `*`.
fn render_keys(keybindings: &KeybindingSettings) -> String {
    let defs = default_keybindings();
    let mut out = String::new();

    for category in KeybindingCategory::all() {
        let _ = writeln!(out, "{}", category.label());
        for def in defs.iter().filter(|def| def.category == *category) {
            let accel = keybindings.get_accel(def);
            let marker = if keybindings.overrides.contains_key(&def.action) {
                "*"
            } else {
                " "
            };
            let command = def
                .command()
                .map(|command| command.to_string())
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {:<26} {:<36}{marker} {command}",
                def.label,
                accel.replace('|', ", ")
            );
        }
        out.push('\n');
    }
    out
}
