//! Shared runtime state for CLI command execution.

use tally_config::{Config, ConfigManager};
use tally_core::LedgerEngine;
use tally_storage_json::FileStore;

use super::{core::CliMode, registry::CommandRegistry};

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub engine: LedgerEngine<FileStore>,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub running: bool,
}

impl ShellContext {
    pub fn new(
        mode: CliMode,
        registry: CommandRegistry,
        engine: LedgerEngine<FileStore>,
        config: Config,
        config_manager: ConfigManager,
    ) -> Self {
        Self {
            mode,
            registry,
            engine,
            config,
            config_manager,
            running: true,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn currency(&self) -> &str {
        &self.config.currency_symbol
    }
}
