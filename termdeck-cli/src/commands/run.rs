//! Script replay command.
//!
//! A script is a TOML document with one `[[command]]` table per step. A step
//! names either a workspace command through `op` or a keybinding action
//! through `action`:
//!
//! ```toml
//! [[command]]
//! op = "new-local-tab"
//!
//! [[command]]
//! action = "win.split-vertical"
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use termdeck_core::command::WorkspaceCommand;
use termdeck_core::config::{AppSettings, command_for_action};
use termdeck_core::dispatch::{InMemoryBackend, SessionDispatcher, SessionEvent, intent_channel};
use termdeck_core::id::SessionId;
use termdeck_core::lifecycle::SessionCoordinator;
use termdeck_core::tracing::span_names;
use termdeck_core::workspace::WorkspaceSnapshot;
use tokio::sync::mpsc;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::format::{render_sessions, render_workspace};

/// One script step as written in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum ScriptStep {
    Command(WorkspaceCommand),
    Action { action: String },
}

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    command: Vec<ScriptStep>,
}

/// Parses a script into workspace commands.
fn parse_script(path: &Path, content: &str) -> Result<Vec<WorkspaceCommand>, CliError> {
    let script: Script = toml::from_str(content).map_err(|e| CliError::Script {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    script
        .command
        .into_iter()
        .enumerate()
        .map(|(index, step)| match step {
            ScriptStep::Command(command) => Ok(command),
            ScriptStep::Action { action } => {
                command_for_action(&action).ok_or_else(|| CliError::Script {
                    path: path.to_path_buf(),
                    message: format!("step {}: unknown action '{action}'", index + 1),
                })
            }
        })
        .collect()
}

/// Result of replaying a script.
#[derive(Debug, Serialize)]
struct ReplayReport {
    steps: Vec<StepReport>,
    workspace: WorkspaceSnapshot,
    live_sessions: Vec<SessionId>,
    failures: Vec<String>,
}

#[derive(Debug, Serialize)]
struct StepReport {
    command: String,
    outcome: String,
}

/// Replays commands against an in-memory backend on the current runtime.
async fn replay(
    commands: &[WorkspaceCommand],
    settings: &AppSettings,
    fail_creates: bool,
) -> Result<ReplayReport, CliError> {
    let backend = InMemoryBackend::new().with_failing_creates(fail_creates);
    let (intents, intent_rx) = intent_channel();
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let dispatcher = SessionDispatcher::new(Arc::new(backend.clone()))
        .with_events(events_tx)
        .spawn(intent_rx);

    let mut coordinator =
        SessionCoordinator::new(intents).with_tab_settings(settings.tabs.clone());
    let steps = commands
        .iter()
        .map(|command| StepReport {
            command: command.to_string(),
            outcome: coordinator.apply(command).to_string(),
        })
        .collect();
    let workspace = coordinator.workspace().snapshot();

    // closes the intent channel so the dispatcher can drain and stop
    drop(coordinator);
    let dispatched = dispatcher
        .await
        .map_err(|e| CliError::Runtime(format!("Dispatcher task failed: {e}")))?;
    tracing::debug!(dispatched, "Replay finished");

    let mut failures = Vec::new();
    while let Ok(event) = events_rx.try_recv() {
        if let SessionEvent::Failed { intent, error } = event {
            failures.push(format!("{intent}: {error}"));
        }
    }

    Ok(ReplayReport {
        steps,
        workspace,
        live_sessions: backend.live_sessions(),
        failures,
    })
}

/// Run command handler
pub fn cmd_run(
    settings: &AppSettings,
    script: &Path,
    format: OutputFormat,
    fail_creates: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let content = std::fs::read_to_string(script).map_err(|e| CliError::Script {
        path: script.to_path_buf(),
        message: e.to_string(),
    })?;
    let commands = parse_script(script, &content)?;

    let _span = termdeck_core::trace_operation!(
        span_names::SCRIPT_REPLAY,
        script = %script.display(),
        steps = commands.len()
    )
    .entered();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))?;
    let report = runtime.block_on(replay(&commands, settings, fail_creates))?;

    if !quiet {
        match format {
            OutputFormat::Tree => print_tree(&report),
            OutputFormat::Json => print_json(&report)?,
        }
    }

    if report.failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::SessionFailures(report.failures.len()))
    }
}

fn print_tree(report: &ReplayReport) {
    for (index, step) in report.steps.iter().enumerate() {
        println!("{:>3}. {:<28} {}", index + 1, step.command, step.outcome);
    }
    println!();
    print!("{}", render_workspace(&report.workspace));
    println!();
    print!("{}", render_sessions(&report.live_sessions));
    for failure in &report.failures {
        eprintln!("failed: {failure}");
    }
}

fn print_json(report: &ReplayReport) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| CliError::Output(format!("Failed to serialize report: {e}")))?;
    println!("{json}");
    Ok(())
}
