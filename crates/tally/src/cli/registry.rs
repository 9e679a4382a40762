//! Command table: names, usage strings, and dispatch handlers.

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Ordered command table. Lookup is by exact name; near-misses get a fuzzy
/// suggestion.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn register(&mut self, entry: CommandEntry) {
        if self.get(entry.name).is_none() {
            self.entries.push(entry);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }

    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.iter()
    }

    /// Closest registered name, when it is close enough to be a plausible
    /// typo.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .map(|entry| (entry.name, strsim::levenshtein(entry.name, input)))
            .min_by_key(|(_, distance)| *distance)
            .filter(|(_, distance)| *distance <= 2)
            .map(|(name, _)| name)
    }
}
