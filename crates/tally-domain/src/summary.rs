//! Derived spending aggregates. Computed from the expense collection on
//! demand, never stored as ground truth.

use std::collections::BTreeMap;

use crate::{category::Category, expense::Expense};

/// Per-category spending totals. Every category is present, zero-filled, so
/// chart rendering never has to special-case missing entries.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotals(BTreeMap<Category, f64>);

impl CategoryTotals {
    pub fn of(expenses: &[Expense]) -> Self {
        let mut totals: BTreeMap<Category, f64> =
            Category::ALL.iter().map(|category| (*category, 0.0)).collect();
        for expense in expenses {
            *totals.entry(expense.category).or_insert(0.0) += expense.price;
        }
        Self(totals)
    }

    pub fn amount(&self, category: Category) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }

    /// Iterates every category in display order with its total.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.0.iter().map(|(category, amount)| (*category, *amount))
    }

    /// Largest per-category total; `0` when nothing is recorded. Used only
    /// for chart bar scaling.
    pub fn max(&self) -> f64 {
        self.0.values().copied().fold(0.0, f64::max)
    }
}

/// Snapshot of every derived aggregate for one expense set.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingSummary {
    pub total_expenses: f64,
    pub totals: CategoryTotals,
    pub max_category_amount: f64,
}

impl SpendingSummary {
    pub fn of(expenses: &[Expense]) -> Self {
        let totals = CategoryTotals::of(expenses);
        let total_expenses = expenses.iter().map(|expense| expense.price).sum();
        let max_category_amount = totals.max();
        Self {
            total_expenses,
            totals,
            max_category_amount,
        }
    }
}

/// A category's slice of total spending, for descending report listings.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: f64,
    pub percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(title: &str, price: f64, category: Category) -> Expense {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        Expense::new(title, price, category, date)
    }

    #[test]
    fn totals_cover_every_category() {
        let totals = CategoryTotals::of(&[]);
        assert_eq!(totals.iter().count(), Category::ALL.len());
        assert!(totals.iter().all(|(_, amount)| amount == 0.0));
    }

    #[test]
    fn summary_matches_the_underlying_expenses() {
        let expenses = vec![
            expense("Lunch", 20.0, Category::Food),
            expense("Dinner", 30.0, Category::Food),
            expense("Train", 12.5, Category::Travel),
        ];

        let summary = SpendingSummary::of(&expenses);
        assert_eq!(summary.total_expenses, 62.5);
        assert_eq!(summary.totals.amount(Category::Food), 50.0);
        assert_eq!(summary.totals.amount(Category::Travel), 12.5);
        assert_eq!(summary.totals.amount(Category::Study), 0.0);
        assert_eq!(summary.max_category_amount, 50.0);
    }

    #[test]
    fn empty_expense_set_yields_zero_max() {
        let summary = SpendingSummary::of(&[]);
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.max_category_amount, 0.0);
    }
}
