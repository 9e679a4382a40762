//! Read-side aggregation over the ledger.

use tally_domain::{
    BudgetStatus, Category, CategoryBudget, CategoryShare, Expense, Ledger, SpendingSummary,
};

/// Aggregates ledger data for display: totals, shares, budget usage.
///
/// See also: [`tally_domain::SpendingSummary`] for the returned data model.
pub struct SummaryService;

impl SummaryService {
    /// Recomputes the full derived set from the expense collection.
    pub fn spending(ledger: &Ledger) -> SpendingSummary {
        SpendingSummary::of(&ledger.expenses)
    }

    /// Categories with spending, sorted by amount descending, each with its
    /// share of the total.
    pub fn category_shares(ledger: &Ledger) -> Vec<CategoryShare> {
        let summary = Self::spending(ledger);
        let mut shares: Vec<CategoryShare> = summary
            .totals
            .iter()
            .filter(|(_, amount)| *amount > 0.0)
            .map(|(category, amount)| CategoryShare {
                category,
                amount,
                percent: amount / summary.total_expenses * 100.0,
            })
            .collect();
        shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        shares
    }

    /// The `count` most expensive records.
    pub fn top_expenses(ledger: &Ledger, count: usize) -> Vec<&Expense> {
        let mut ordered: Vec<&Expense> = ledger.expenses.iter().collect();
        ordered.sort_by(|a, b| b.price.total_cmp(&a.price));
        ordered.truncate(count);
        ordered
    }

    /// Budget usage for every category with a limit, in category order.
    /// `spent` comes from the expense aggregates, never from stored data.
    pub fn budget_statuses(ledger: &Ledger, budgets: &[CategoryBudget]) -> Vec<BudgetStatus> {
        let totals = Self::spending(ledger).totals;
        Category::ALL
            .iter()
            .filter_map(|category| {
                budgets
                    .iter()
                    .find(|budget| budget.category == *category)
                    .map(|budget| {
                        let spent = totals.amount(*category);
                        BudgetStatus {
                            category: *category,
                            amount: budget.amount,
                            spent,
                            remaining: budget.amount - spent,
                        }
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ledger_with_expenses() -> Ledger {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).expect("valid date");
        Ledger {
            wallet_balance: 4000.0,
            expenses: vec![
                Expense::new("Groceries", 120.0, Category::Food, date),
                Expense::new("Cinema", 30.0, Category::Entertainment, date),
                Expense::new("Snacks", 30.0, Category::Food, date),
            ],
        }
    }

    #[test]
    fn shares_are_sorted_descending_and_sum_to_one_hundred() {
        let ledger = ledger_with_expenses();
        let shares = SummaryService::category_shares(&ledger);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, Category::Food);
        assert_eq!(shares[0].amount, 150.0);
        let percent_sum: f64 = shares.iter().map(|share| share.percent).sum();
        assert!((percent_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn top_expenses_returns_the_priciest_records() {
        let ledger = ledger_with_expenses();
        let top = SummaryService::top_expenses(&ledger, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].title, "Groceries");
        assert_eq!(top[1].price, 30.0);
    }

    #[test]
    fn budget_statuses_derive_spent_from_expenses() {
        let ledger = ledger_with_expenses();
        let budgets = vec![
            CategoryBudget {
                category: Category::Food,
                amount: 100.0,
            },
            CategoryBudget {
                category: Category::Travel,
                amount: 500.0,
            },
        ];

        let statuses = SummaryService::budget_statuses(&ledger, &budgets);
        assert_eq!(statuses.len(), 2);

        let food = &statuses[0];
        assert_eq!(food.category, Category::Food);
        assert_eq!(food.spent, 150.0);
        assert_eq!(food.remaining, -50.0);
        assert!(food.is_over_budget());

        let travel = &statuses[1];
        assert_eq!(travel.spent, 0.0);
        assert!(!travel.is_over_budget());
    }
}
