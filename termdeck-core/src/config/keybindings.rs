//! Custom keybinding configuration
//!
//! Provides [`KeybindingSettings`] for user-customizable keyboard shortcuts
//! and [`KeybindingDef`] for the default keybinding registry. Every
//! layout action resolves to a [`WorkspaceCommand`] through
//! [`command_for_action`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::command::WorkspaceCommand;
use crate::split::SplitDirection;

/// Custom keybinding overrides stored in user settings.
///
/// Each entry maps an action name (e.g. `"win.close-tab"`) to an
/// accelerator string (e.g. `"<Control><Shift>w"`). Actions not present in
/// `overrides` use their built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingSettings {
    /// Action name to accelerator mapping.
    ///
    /// Only overridden bindings are stored; defaults are implicit.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, String>,
}

/// A single keybinding definition with its default accelerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindingDef {
    /// Action name (e.g. `"win.split-pane-vertical"`)
    pub action: String,
    /// Default accelerator(s), pipe-separated for multiple (e.g. `"<Control>Tab|<Control>Page_Down"`)
    pub default_accels: String,
    /// Human-readable label
    pub label: String,
    /// Category for grouping in listings
    pub category: KeybindingCategory,
}

/// Categories for organizing keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeybindingCategory {
    /// Tab management
    Tabs,
    /// Pane group layout
    Groups,
    /// Split panes inside a tab
    Panes,
}

impl KeybindingCategory {
    /// Returns the display label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tabs => "Tabs",
            Self::Groups => "Pane Groups",
            Self::Panes => "Split Panes",
        }
    }

    /// Returns all categories in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Tabs, Self::Groups, Self::Panes]
    }
}

impl KeybindingDef {
    /// Creates a new keybinding definition.
    #[must_use]
    pub fn new(
        action: impl Into<String>,
        default_accels: impl Into<String>,
        label: impl Into<String>,
        category: KeybindingCategory,
    ) -> Self {
        Self {
            action: action.into(),
            default_accels: default_accels.into(),
            label: label.into(),
            category,
        }
    }

    /// Splits the default accelerators into a list.
    #[must_use]
    pub fn default_accel_list(&self) -> Vec<&str> {
        self.default_accels.split('|').collect()
    }

    /// Returns the command this binding triggers.
    #[must_use]
    pub fn command(&self) -> Option<WorkspaceCommand> {
        command_for_action(&self.action)
    }
}

impl KeybindingSettings {
    /// Returns the accelerator(s) for an action, falling back to the default.
    #[must_use]
    pub fn get_accel<'a>(&'a self, def: &'a KeybindingDef) -> &'a str {
        self.overrides
            .get(&def.action)
            .map_or(def.default_accels.as_str(), String::as_str)
    }

    /// Returns `true` if the user has overridden any keybindings.
    #[must_use]
    pub fn has_overrides(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// Returns overrides naming an unknown action or holding an invalid
    /// accelerator.
    #[must_use]
    pub fn invalid_overrides(&self) -> Vec<(&str, &str)> {
        self.overrides
            .iter()
            .filter(|(action, accel)| {
                command_for_action(action).is_none() || !is_valid_accelerator(accel)
            })
            .map(|(action, accel)| (action.as_str(), accel.as_str()))
            .collect()
    }

    /// Resets a single action to its default binding.
    pub fn reset(&mut self, action: &str) {
        self.overrides.remove(action);
    }

    /// Resets all overrides.
    pub fn reset_all(&mut self) {
        self.overrides.clear();
    }
}

/// Returns the complete list of default keybinding definitions in display
/// order.
#[must_use]
pub fn default_keybindings() -> Vec<KeybindingDef> {
    use KeybindingCategory::{Groups, Panes, Tabs};
    vec![
        // Tabs
        KeybindingDef::new(
            "win.local-shell",
            "<Control><Shift>t",
            "Local Shell",
            Tabs,
        ),
        KeybindingDef::new("win.settings", "<Control>comma", "Settings", Tabs),
        KeybindingDef::new("win.close-tab", "<Control>w", "Close Tab", Tabs),
        KeybindingDef::new(
            "win.next-tab",
            "<Control>Tab|<Control>Page_Down",
            "Next Tab",
            Tabs,
        ),
        KeybindingDef::new(
            "win.prev-tab",
            "<Control><Shift>Tab|<Control>Page_Up",
            "Previous Tab",
            Tabs,
        ),
        // Groups
        KeybindingDef::new(
            "win.split-group-horizontal",
            "<Control><Alt>h",
            "Split Group Horizontal",
            Groups,
        ),
        KeybindingDef::new(
            "win.split-group-vertical",
            "<Control><Alt>s",
            "Split Group Vertical",
            Groups,
        ),
        KeybindingDef::new(
            "win.close-group",
            "<Control><Alt>w",
            "Close Group",
            Groups,
        ),
        KeybindingDef::new(
            "win.next-group",
            "<Control><Alt>Right",
            "Next Group",
            Groups,
        ),
        KeybindingDef::new(
            "win.prev-group",
            "<Control><Alt>Left",
            "Previous Group",
            Groups,
        ),
        // Panes
        KeybindingDef::new(
            "win.split-horizontal",
            "<Control><Shift>h",
            "Split Horizontal",
            Panes,
        ),
        KeybindingDef::new(
            "win.split-vertical",
            "<Control><Shift>s",
            "Split Vertical",
            Panes,
        ),
        KeybindingDef::new(
            "win.close-pane",
            "<Control><Shift>w",
            "Close Pane",
            Panes,
        ),
        KeybindingDef::new(
            "win.focus-next-pane",
            "<Control>grave",
            "Focus Next Pane",
            Panes,
        ),
        KeybindingDef::new(
            "win.focus-prev-pane",
            "<Control><Shift>asciitilde",
            "Focus Previous Pane",
            Panes,
        ),
        KeybindingDef::new(
            "win.pane-local-shell",
            "<Control><Shift>l",
            "Open Local Shell in Pane",
            Panes,
        ),
    ]
}

/// Maps a keybinding action to the command it triggers.
#[must_use]
pub fn command_for_action(action: &str) -> Option<WorkspaceCommand> {
    let command = match action {
        "win.local-shell" => WorkspaceCommand::NewLocalTab,
        "win.settings" => WorkspaceCommand::OpenSettings,
        "win.close-tab" => WorkspaceCommand::CloseActiveTab,
        "win.next-tab" => WorkspaceCommand::NextTab,
        "win.prev-tab" => WorkspaceCommand::PreviousTab,
        "win.split-group-horizontal" => WorkspaceCommand::SplitGroup {
            direction: SplitDirection::Horizontal,
        },
        "win.split-group-vertical" => WorkspaceCommand::SplitGroup {
            direction: SplitDirection::Vertical,
        },
        "win.close-group" => WorkspaceCommand::CloseFocusedGroup,
        "win.next-group" => WorkspaceCommand::NextGroup,
        "win.prev-group" => WorkspaceCommand::PreviousGroup,
        "win.split-horizontal" => WorkspaceCommand::SplitPane {
            direction: SplitDirection::Horizontal,
        },
        "win.split-vertical" => WorkspaceCommand::SplitPane {
            direction: SplitDirection::Vertical,
        },
        "win.close-pane" => WorkspaceCommand::CloseFocusedPane,
        "win.focus-next-pane" => WorkspaceCommand::FocusNextPane,
        "win.focus-prev-pane" => WorkspaceCommand::FocusPreviousPane,
        "win.pane-local-shell" => WorkspaceCommand::BindLocal,
        _ => return None,
    };
    Some(command)
}

/// Validates an accelerator string.
///
/// Returns `true` if the string contains a key name, optionally preceded by
/// modifiers.
#[must_use]
pub fn is_valid_accelerator(accel: &str) -> bool {
    // must end with a key name, not a modifier tag
    let trimmed = accel.trim();
    !trimmed.is_empty() && !trimmed.ends_with('>')
}
