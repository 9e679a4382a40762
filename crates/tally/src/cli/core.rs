//! Shared CLI types: execution mode, command errors, command results.

use thiserror::Error;

use tally_core::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Engine(#[from] CoreError),
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Command failed: {0}")]
    Command(String),
}

pub type CommandResult = Result<(), CommandError>;
