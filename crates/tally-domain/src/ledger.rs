//! The ledger aggregate: wallet balance plus recorded expenses.

use uuid::Uuid;

use crate::expense::Expense;

/// Wallet balance assigned when no persisted state exists.
pub const DEFAULT_WALLET_BALANCE: f64 = 5000.0;

/// The single consistency domain of the tracker. Aggregates (totals,
/// per-category sums) are always derived from `expenses`, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub wallet_balance: f64,
    pub expenses: Vec<Expense>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            wallet_balance: DEFAULT_WALLET_BALANCE,
            expenses: Vec::new(),
        }
    }
}

impl Ledger {
    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    /// Expenses sorted by calendar date, earliest first. Records sharing a
    /// date keep their insertion order.
    pub fn by_date(&self) -> Vec<&Expense> {
        let mut ordered: Vec<&Expense> = self.expenses.iter().collect();
        ordered.sort_by_key(|expense| expense.date);
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
    }

    #[test]
    fn by_date_orders_earliest_first() {
        let mut ledger = Ledger::default();
        ledger
            .expenses
            .push(Expense::new("Cinema", 15.0, Category::Entertainment, date(20)));
        ledger
            .expenses
            .push(Expense::new("Lunch", 20.0, Category::Food, date(3)));

        let ordered = ledger.by_date();
        assert_eq!(ordered[0].title, "Lunch");
        assert_eq!(ordered[1].title, "Cinema");
    }
}
