//! Interactive and script entry points for the CLI.

use std::{
    env,
    io::{self, BufRead},
    path::PathBuf,
};

use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::warn;

use tally_config::{Config, ConfigManager};
use tally_core::LedgerEngine;
use tally_storage_json::FileStore;

use super::{
    commands,
    core::{CliMode, CommandError, CommandResult},
    output,
    shell_context::ShellContext,
};

const PROMPT: &str = "tally> ";
/// Set to any value to force non-interactive script mode (commands read
/// from stdin, one per line).
pub const SCRIPT_ENV: &str = "TALLY_CLI_SCRIPT";
/// Overrides the base data directory; used by tests and scripting.
pub const DATA_DIR_ENV: &str = "TALLY_DATA_DIR";

pub fn run_cli() -> CommandResult {
    let base = base_dir();
    let config_manager = ConfigManager::with_base_dir(base.clone())
        .map_err(|err| CommandError::Command(err.to_string()))?;
    let config = match config_manager.load() {
        Ok(config) => config,
        Err(err) => {
            warn!(%err, "falling back to default configuration");
            Config::default()
        }
    };

    let data_dir = config
        .data_dir
        .clone()
        .unwrap_or_else(|| base.join("state"));
    let store = FileStore::new(data_dir)?;
    let engine = LedgerEngine::open(store)?;

    let mode = if env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    let mut context = ShellContext::new(
        mode,
        commands::build_registry(),
        engine,
        config,
        config_manager,
    );

    // A command given on the command line runs once and exits.
    let args: Vec<String> = env::args().skip(1).collect();
    if !args.is_empty() {
        let parts: Vec<&str> = args.iter().map(String::as_str).collect();
        return dispatch(&mut context, &parts);
    }

    match mode {
        CliMode::Script => run_script(&mut context),
        CliMode::Interactive => run_interactive(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> CommandResult {
    let mut editor =
        DefaultEditor::new().map_err(|err| CommandError::Command(err.to_string()))?;
    while context.running {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                if let Err(err) = run_line(context, line) {
                    output::error(&err.to_string());
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(CommandError::Command(err.to_string())),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> CommandResult {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|err| CommandError::Command(err.to_string()))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Err(err) = run_line(context, line) {
            output::error(&err.to_string());
        }
        if !context.running {
            break;
        }
    }
    Ok(())
}

fn run_line(context: &mut ShellContext, line: &str) -> CommandResult {
    let parts = shell_words::split(line)
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
    dispatch(context, &refs)
}

fn dispatch(context: &mut ShellContext, parts: &[&str]) -> CommandResult {
    let Some((name, args)) = parts.split_first() else {
        return Ok(());
    };
    let name = name.to_ascii_lowercase();
    match context.registry.handler(&name) {
        Some(handler) => handler(context, args),
        None => {
            let mut message = format!("unknown command `{name}`");
            if let Some(suggestion) = context.registry.suggest(&name) {
                message.push_str(&format!(", did you mean `{suggestion}`?"));
            }
            Err(CommandError::InvalidArguments(message))
        }
    }
}

fn base_dir() -> PathBuf {
    env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(ConfigManager::default_base_dir)
}
