//! Serialization of ledger state to and from the key-value store.
//!
//! Restore never fails on bad data: an absent or malformed value falls back
//! to the default for that key and is overwritten on the next successful
//! mutation. Each key is decoded independently, so a corrupt expense list
//! does not discard a valid wallet balance.

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use tally_domain::{Bill, CategoryBudget, Expense, Ledger, DEFAULT_WALLET_BALANCE};

use crate::{
    error::CoreResult,
    storage::{keys, StateStore},
};

pub fn load_ledger(store: &dyn StateStore) -> CoreResult<Ledger> {
    let expenses = load_collection::<Expense>(store, keys::EXPENSES)?;
    let wallet_balance = load_wallet(store)?;
    Ok(Ledger {
        wallet_balance,
        expenses,
    })
}

pub fn save_ledger(store: &dyn StateStore, ledger: &Ledger) -> CoreResult<()> {
    save_collection(store, keys::EXPENSES, &ledger.expenses)?;
    store.put(keys::WALLET, &encode_wallet(ledger.wallet_balance))
}

pub fn load_bills(store: &dyn StateStore) -> CoreResult<Vec<Bill>> {
    load_collection(store, keys::BILLS)
}

pub fn save_bills(store: &dyn StateStore, bills: &[Bill]) -> CoreResult<()> {
    save_collection(store, keys::BILLS, bills)
}

pub fn load_budgets(store: &dyn StateStore) -> CoreResult<Vec<CategoryBudget>> {
    load_collection(store, keys::BUDGETS)
}

pub fn save_budgets(store: &dyn StateStore, budgets: &[CategoryBudget]) -> CoreResult<()> {
    save_collection(store, keys::BUDGETS, budgets)
}

/// The wallet balance persists as a plain decimal string.
fn encode_wallet(balance: f64) -> String {
    balance.to_string()
}

fn load_wallet(store: &dyn StateStore) -> CoreResult<f64> {
    let Some(raw) = store.get(keys::WALLET)? else {
        return Ok(DEFAULT_WALLET_BALANCE);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => {
            warn!(key = keys::WALLET, "discarding unparseable wallet balance");
            Ok(DEFAULT_WALLET_BALANCE)
        }
    }
}

fn load_collection<T: DeserializeOwned>(
    store: &dyn StateStore,
    key: &'static str,
) -> CoreResult<Vec<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(err) => {
            warn!(key, %err, "discarding malformed persisted data");
            Ok(Vec::new())
        }
    }
}

fn save_collection<T: Serialize>(
    store: &dyn StateStore,
    key: &'static str,
    items: &[T],
) -> CoreResult<()> {
    let encoded = serde_json::to_string(items)?;
    store.put(key, &encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;
    use tally_domain::Category;

    fn sample_ledger() -> Ledger {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        Ledger {
            wallet_balance: 4980.0,
            expenses: vec![Expense::new("Lunch", 20.0, Category::Food, date)],
        }
    }

    #[test]
    fn ledger_survives_a_save_load_cycle() {
        let store = MemoryStore::new();
        let ledger = sample_ledger();

        save_ledger(&store, &ledger).expect("save");
        let restored = load_ledger(&store).expect("load");

        assert_eq!(restored, ledger);
        assert_eq!(
            store.get(keys::WALLET).expect("get"),
            Some("4980".to_string()),
            "wallet persists as a decimal string"
        );
    }

    #[test]
    fn empty_store_restores_the_default_state() {
        let store = MemoryStore::new();
        let restored = load_ledger(&store).expect("load");

        assert_eq!(restored.wallet_balance, DEFAULT_WALLET_BALANCE);
        assert!(restored.expenses.is_empty());
    }

    #[test]
    fn malformed_expenses_fall_back_without_touching_the_wallet() {
        let store = MemoryStore::new();
        store.put(keys::WALLET, "1234.5").expect("put wallet");
        store.put(keys::EXPENSES, "{not json").expect("put garbage");

        let restored = load_ledger(&store).expect("load");
        assert_eq!(restored.wallet_balance, 1234.5);
        assert!(restored.expenses.is_empty());
    }

    #[test]
    fn unparseable_wallet_falls_back_to_the_default() {
        let store = MemoryStore::new();
        store.put(keys::WALLET, "a lot").expect("put");

        let restored = load_ledger(&store).expect("load");
        assert_eq!(restored.wallet_balance, DEFAULT_WALLET_BALANCE);
    }
}
