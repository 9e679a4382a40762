//! Persistence seam: a durable key-value store with string values.

use std::{collections::HashMap, sync::Mutex};

use crate::error::CoreError;

/// Logical keys the engine persists under.
pub mod keys {
    /// Serialized expense records.
    pub const EXPENSES: &str = "expenses";
    /// Wallet balance as a decimal string.
    pub const WALLET: &str = "wallet";
    /// Serialized bill reminders.
    pub const BILLS: &str = "bills";
    /// Serialized category budgets.
    pub const BUDGETS: &str = "budgets";
}

/// Abstraction over durable local stores with get/set-string semantics.
/// Implementations must make `put` durable before returning: the engine
/// reports success to its caller only after the store has accepted the
/// write.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn put(&self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// Volatile in-memory store: the substitute for a real durable store in
/// isolated engine tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let entries = self.entries.lock().expect("memory store lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut entries = self.entries.lock().expect("memory store lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
