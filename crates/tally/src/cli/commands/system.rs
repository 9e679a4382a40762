//! Shell housekeeping: help, version, theme, exit.

use colored::Colorize;

use tally_config::Theme;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "List commands or show usage", "help [command]", cmd_help),
        CommandEntry::new("version", "Print the tally version", "version", cmd_version),
        CommandEntry::new(
            "theme",
            "Show or set the display theme",
            "theme [light|dark]",
            cmd_theme,
        ),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(name) => {
            let entry = context.registry.get(name).ok_or_else(|| {
                CommandError::InvalidArguments(format!("unknown command `{name}`"))
            })?;
            println!("{}", entry.name.bold());
            println!("  {}", entry.description);
            println!("  usage: {}", entry.usage);
        }
        None => {
            println!("Available commands:");
            for entry in context.registry.list() {
                println!("  {} {}", format!("{:<10}", entry.name).bold(), entry.description);
            }
            output::detail("Use `help <command>` for details.");
        }
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    println!("tally {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

fn cmd_theme(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        None => {
            println!("Theme: {}", context.config.theme);
        }
        Some(value) => {
            context.config.theme = Theme::from_str(value);
            context
                .config_manager
                .save(&context.config)
                .map_err(|err| CommandError::Command(err.to_string()))?;
            output::success(&format!("Theme set to {}", context.config.theme));
        }
    }
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.running = false;
    Ok(())
}
