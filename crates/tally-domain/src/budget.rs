//! Per-category spending limits and their derived status.

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A monthly spending limit for one category. At most one per category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryBudget {
    pub category: Category,
    pub amount: f64,
}

/// Budget utilization derived from the expense aggregates at read time.
/// `remaining` goes negative when the category is over budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetStatus {
    pub category: Category,
    pub amount: f64,
    pub spent: f64,
    pub remaining: f64,
}

impl BudgetStatus {
    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}
