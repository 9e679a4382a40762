//! The ledger engine: validated, transactional mutations over wallet and
//! expense state.

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use tally_domain::{
    Bill, BudgetStatus, Category, CategoryBudget, CategoryShare, Expense, ExpenseDraft, Ledger,
    SpendingSummary, DEFAULT_WALLET_BALANCE,
};

use crate::{
    codec,
    error::{CoreError, CoreResult},
    storage::StateStore,
    summary::SummaryService,
};

/// Sole owner of the tracker state. Every mutation validates its input,
/// applies to a working copy, persists the result, and only then commits:
/// callers never observe a half-applied operation, and no success is
/// reported before the store has accepted the write.
pub struct LedgerEngine<S: StateStore> {
    store: S,
    ledger: Ledger,
    bills: Vec<Bill>,
    budgets: Vec<CategoryBudget>,
}

impl<S: StateStore> LedgerEngine<S> {
    /// Restores persisted state from the store. Absent or malformed data
    /// falls back to the default initial state per key; only store I/O
    /// failures propagate.
    pub fn open(store: S) -> CoreResult<Self> {
        let ledger = codec::load_ledger(&store)?;
        let bills = codec::load_bills(&store)?;
        let budgets = codec::load_budgets(&store)?;
        Ok(Self {
            store,
            ledger,
            bills,
            budgets,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // Read side.

    pub fn wallet_balance(&self) -> f64 {
        self.ledger.wallet_balance
    }

    /// Expenses in insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.ledger.expenses
    }

    /// Expenses sorted by calendar date, earliest first.
    pub fn expenses_by_date(&self) -> Vec<&Expense> {
        self.ledger.by_date()
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.ledger.expense(id)
    }

    pub fn summary(&self) -> SpendingSummary {
        SummaryService::spending(&self.ledger)
    }

    pub fn category_shares(&self) -> Vec<CategoryShare> {
        SummaryService::category_shares(&self.ledger)
    }

    pub fn top_expenses(&self, count: usize) -> Vec<&Expense> {
        SummaryService::top_expenses(&self.ledger, count)
    }

    /// Bills ordered for display: unpaid first, then ascending due date.
    pub fn bills_sorted(&self) -> Vec<&Bill> {
        let mut ordered: Vec<&Bill> = self.bills.iter().collect();
        ordered.sort_by(|a, b| Bill::display_order(a, b));
        ordered
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn bill(&self, id: Uuid) -> Option<&Bill> {
        self.bills.iter().find(|bill| bill.id == id)
    }

    pub fn budget_statuses(&self) -> Vec<BudgetStatus> {
        SummaryService::budget_statuses(&self.ledger, &self.budgets)
    }

    // Wallet operations.

    /// Deposits income and returns the updated balance.
    pub fn add_income(&mut self, amount: f64) -> CoreResult<f64> {
        validate_amount("amount", amount)?;
        let mut next = self.ledger.clone();
        next.wallet_balance += amount;
        self.commit_ledger(next)?;
        debug!(amount, balance = self.ledger.wallet_balance, "income added");
        Ok(self.ledger.wallet_balance)
    }

    /// Restores the wallet to its default starting balance without touching
    /// the recorded expenses.
    pub fn reset_wallet_balance(&mut self) -> CoreResult<f64> {
        let mut next = self.ledger.clone();
        next.wallet_balance = DEFAULT_WALLET_BALANCE;
        self.commit_ledger(next)?;
        debug!(balance = self.ledger.wallet_balance, "wallet reset");
        Ok(self.ledger.wallet_balance)
    }

    // Expense operations.

    /// Records a new expense funded from the wallet. The expense receives a
    /// fresh id; the wallet must cover the full price.
    pub fn add_expense(&mut self, draft: ExpenseDraft) -> CoreResult<Expense> {
        validate_title("title", &draft.title)?;
        validate_amount("price", draft.price)?;
        if self.ledger.wallet_balance < draft.price {
            return Err(CoreError::InsufficientBalance);
        }

        let expense = Expense::new(draft.title.trim(), draft.price, draft.category, draft.date);
        let mut next = self.ledger.clone();
        next.wallet_balance -= expense.price;
        next.expenses.push(expense.clone());
        self.commit_ledger(next)?;
        debug!(id = %expense.id, price = expense.price, "expense recorded");
        Ok(expense)
    }

    /// Replaces an expense's fields in place, keeping its id. A price
    /// increase must be affordable from the current balance; a decrease
    /// refunds the difference.
    pub fn update_expense(&mut self, id: Uuid, draft: ExpenseDraft) -> CoreResult<Expense> {
        let position = self
            .ledger
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(CoreError::ExpenseNotFound(id))?;
        validate_title("title", &draft.title)?;
        validate_amount("price", draft.price)?;

        let delta = draft.price - self.ledger.expenses[position].price;
        if self.ledger.wallet_balance < delta {
            return Err(CoreError::InsufficientBalance);
        }

        let mut next = self.ledger.clone();
        next.wallet_balance -= delta;
        let expense = &mut next.expenses[position];
        expense.title = draft.title.trim().to_string();
        expense.price = draft.price;
        expense.category = draft.category;
        expense.date = draft.date;
        let updated = expense.clone();
        self.commit_ledger(next)?;
        debug!(id = %updated.id, delta, "expense updated");
        Ok(updated)
    }

    /// Removes an expense and refunds its price to the wallet. Deleting an
    /// unknown id fails with [`CoreError::ExpenseNotFound`] and changes
    /// nothing.
    pub fn delete_expense(&mut self, id: Uuid) -> CoreResult<Uuid> {
        let position = self
            .ledger
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(CoreError::ExpenseNotFound(id))?;

        let mut next = self.ledger.clone();
        let removed = next.expenses.remove(position);
        next.wallet_balance += removed.price;
        self.commit_ledger(next)?;
        debug!(id = %removed.id, refund = removed.price, "expense deleted");
        Ok(removed.id)
    }

    // Bill operations. Bills are reminders: none of these touch the wallet.

    pub fn add_bill(&mut self, name: &str, amount: f64, due_date: NaiveDate) -> CoreResult<Bill> {
        validate_title("name", name)?;
        validate_amount("amount", amount)?;

        let bill = Bill::new(name.trim(), amount, due_date);
        let mut next = self.bills.clone();
        next.push(bill.clone());
        self.commit_bills(next)?;
        Ok(bill)
    }

    pub fn update_bill(
        &mut self,
        id: Uuid,
        name: &str,
        amount: f64,
        due_date: NaiveDate,
    ) -> CoreResult<Bill> {
        let position = self.bill_position(id)?;
        validate_title("name", name)?;
        validate_amount("amount", amount)?;

        let mut next = self.bills.clone();
        let bill = &mut next[position];
        bill.name = name.trim().to_string();
        bill.amount = amount;
        bill.due_date = due_date;
        let updated = bill.clone();
        self.commit_bills(next)?;
        Ok(updated)
    }

    pub fn delete_bill(&mut self, id: Uuid) -> CoreResult<Uuid> {
        let position = self.bill_position(id)?;
        let mut next = self.bills.clone();
        next.remove(position);
        self.commit_bills(next)?;
        Ok(id)
    }

    pub fn set_bill_paid(&mut self, id: Uuid, paid: bool) -> CoreResult<Bill> {
        let position = self.bill_position(id)?;
        let mut next = self.bills.clone();
        next[position].paid = paid;
        let updated = next[position].clone();
        self.commit_bills(next)?;
        Ok(updated)
    }

    // Budget operations.

    /// Sets or replaces the spending limit for a category.
    pub fn set_budget(&mut self, category: Category, amount: f64) -> CoreResult<CategoryBudget> {
        validate_amount("amount", amount)?;

        let mut next = self.budgets.clone();
        match next.iter_mut().find(|budget| budget.category == category) {
            Some(existing) => existing.amount = amount,
            None => next.push(CategoryBudget { category, amount }),
        }
        self.commit_budgets(next)?;
        Ok(CategoryBudget { category, amount })
    }

    /// Clears the limit for a category. Clearing an unset category is a
    /// no-op.
    pub fn clear_budget(&mut self, category: Category) -> CoreResult<()> {
        if !self.budgets.iter().any(|budget| budget.category == category) {
            return Ok(());
        }
        let next = self
            .budgets
            .iter()
            .filter(|budget| budget.category != category)
            .cloned()
            .collect();
        self.commit_budgets(next)
    }

    // Persist-before-commit plumbing.

    fn commit_ledger(&mut self, next: Ledger) -> CoreResult<()> {
        codec::save_ledger(&self.store, &next)?;
        self.ledger = next;
        Ok(())
    }

    fn commit_bills(&mut self, next: Vec<Bill>) -> CoreResult<()> {
        codec::save_bills(&self.store, &next)?;
        self.bills = next;
        Ok(())
    }

    fn commit_budgets(&mut self, next: Vec<CategoryBudget>) -> CoreResult<()> {
        codec::save_budgets(&self.store, &next)?;
        self.budgets = next;
        Ok(())
    }

    fn bill_position(&self, id: Uuid) -> CoreResult<usize> {
        self.bills
            .iter()
            .position(|bill| bill.id == id)
            .ok_or(CoreError::BillNotFound(id))
    }
}

/// Uniform amount validation shared by every mutating entry point: rejects
/// non-finite, zero, and negative values.
fn validate_amount(field: &'static str, value: f64) -> CoreResult<()> {
    if !value.is_finite() {
        return Err(CoreError::validation(field, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(CoreError::validation(field, "must be greater than zero"));
    }
    Ok(())
}

fn validate_title(field: &'static str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(field, "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
    }

    fn engine() -> LedgerEngine<MemoryStore> {
        LedgerEngine::open(MemoryStore::new()).expect("open on empty store")
    }

    fn lunch() -> ExpenseDraft {
        ExpenseDraft::new("Lunch", 20.0, Category::Food, date(1))
    }

    /// The consistency law: derived aggregates always match the expense set.
    fn assert_consistent<S: StateStore>(engine: &LedgerEngine<S>) {
        let summary = engine.summary();
        let expected_total: f64 = engine.expenses().iter().map(|e| e.price).sum();
        assert_eq!(summary.total_expenses, expected_total);
        for category in Category::ALL {
            let expected: f64 = engine
                .expenses()
                .iter()
                .filter(|e| e.category == category)
                .map(|e| e.price)
                .sum();
            assert_eq!(summary.totals.amount(category), expected);
        }
        assert_eq!(summary.max_category_amount, summary.totals.max());
    }

    #[test]
    fn fresh_engine_starts_with_the_default_state() {
        let engine = engine();
        assert_eq!(engine.wallet_balance(), DEFAULT_WALLET_BALANCE);
        assert!(engine.expenses().is_empty());
        assert_consistent(&engine);
    }

    #[test]
    fn add_expense_deducts_price_and_updates_aggregates() {
        let mut engine = engine();
        let expense = engine.add_expense(lunch()).expect("add succeeds");

        assert_eq!(engine.wallet_balance(), 4980.0);
        assert_eq!(engine.summary().totals.amount(Category::Food), 20.0);
        assert_eq!(engine.summary().total_expenses, 20.0);
        assert_eq!(engine.expense(expense.id), Some(&expense));
        assert_consistent(&engine);
    }

    #[test]
    fn unaffordable_expense_is_rejected_without_mutation() {
        let mut engine = engine();
        engine.add_expense(lunch()).expect("add succeeds");

        let err = engine
            .add_expense(ExpenseDraft::new("Flight", 6000.0, Category::Travel, date(2)))
            .expect_err("must fail");
        assert!(matches!(err, CoreError::InsufficientBalance));
        assert_eq!(engine.wallet_balance(), 4980.0);
        assert_eq!(engine.expenses().len(), 1);
        assert_consistent(&engine);
    }

    #[test]
    fn update_expense_applies_the_price_delta() {
        let mut engine = engine();
        let expense = engine.add_expense(lunch()).expect("add succeeds");

        let updated = engine
            .update_expense(
                expense.id,
                ExpenseDraft::new("Lunch", 50.0, Category::Food, date(1)),
            )
            .expect("update succeeds");

        assert_eq!(updated.id, expense.id);
        assert_eq!(engine.wallet_balance(), 4950.0);
        assert_eq!(engine.summary().totals.amount(Category::Food), 50.0);
        assert_consistent(&engine);
    }

    #[test]
    fn update_lowering_the_price_refunds_the_difference() {
        let mut engine = engine();
        let expense = engine.add_expense(lunch()).expect("add succeeds");

        engine
            .update_expense(
                expense.id,
                ExpenseDraft::new("Light lunch", 5.0, Category::Food, date(1)),
            )
            .expect("update succeeds");

        assert_eq!(engine.wallet_balance(), 4995.0);
        assert_consistent(&engine);
    }

    #[test]
    fn update_rejects_an_unaffordable_price_increase() {
        let mut engine = engine();
        let expense = engine.add_expense(lunch()).expect("add succeeds");

        let err = engine
            .update_expense(
                expense.id,
                ExpenseDraft::new("Banquet", 9000.0, Category::Food, date(1)),
            )
            .expect_err("must fail");
        assert!(matches!(err, CoreError::InsufficientBalance));
        assert_eq!(engine.wallet_balance(), 4980.0);
        assert_eq!(engine.summary().totals.amount(Category::Food), 20.0);
    }

    #[test]
    fn update_of_an_unknown_id_fails() {
        let mut engine = engine();
        let missing = Uuid::new_v4();
        let err = engine
            .update_expense(missing, lunch())
            .expect_err("must fail");
        assert!(matches!(err, CoreError::ExpenseNotFound(id) if id == missing));
    }

    #[test]
    fn delete_refunds_and_a_second_delete_fails_without_change() {
        let mut engine = engine();
        let expense = engine.add_expense(lunch()).expect("add succeeds");
        engine
            .update_expense(
                expense.id,
                ExpenseDraft::new("Lunch", 50.0, Category::Food, date(1)),
            )
            .expect("update succeeds");

        let removed = engine.delete_expense(expense.id).expect("delete succeeds");
        assert_eq!(removed, expense.id);
        assert_eq!(engine.wallet_balance(), DEFAULT_WALLET_BALANCE);
        assert!(engine.expenses().is_empty());
        assert_eq!(engine.summary().totals.amount(Category::Food), 0.0);

        let err = engine
            .delete_expense(expense.id)
            .expect_err("second delete must fail");
        assert!(matches!(err, CoreError::ExpenseNotFound(_)));
        assert_eq!(engine.wallet_balance(), DEFAULT_WALLET_BALANCE);
        assert!(engine.expenses().is_empty());
        assert_consistent(&engine);
    }

    #[test]
    fn negative_income_is_rejected_without_mutation() {
        let mut engine = engine();
        let err = engine.add_income(-10.0).expect_err("must fail");
        assert!(matches!(err, CoreError::Validation { field: "amount", .. }));
        assert_eq!(engine.wallet_balance(), DEFAULT_WALLET_BALANCE);
    }

    #[test]
    fn non_finite_amounts_are_rejected_at_every_entry_point() {
        let mut engine = engine();
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0] {
            assert!(matches!(
                engine.add_income(bad),
                Err(CoreError::Validation { field: "amount", .. })
            ));
            assert!(matches!(
                engine.add_expense(ExpenseDraft::new("X", bad, Category::Food, date(1))),
                Err(CoreError::Validation { field: "price", .. })
            ));
            assert!(matches!(
                engine.add_bill("Rent", bad, date(1)),
                Err(CoreError::Validation { field: "amount", .. })
            ));
            assert!(matches!(
                engine.set_budget(Category::Food, bad),
                Err(CoreError::Validation { field: "amount", .. })
            ));
        }
        assert_eq!(engine.wallet_balance(), DEFAULT_WALLET_BALANCE);
        assert!(engine.expenses().is_empty());
    }

    #[test]
    fn blank_titles_are_rejected() {
        let mut engine = engine();
        let err = engine
            .add_expense(ExpenseDraft::new("   ", 10.0, Category::Food, date(1)))
            .expect_err("must fail");
        assert!(matches!(err, CoreError::Validation { field: "title", .. }));
        assert!(engine.expenses().is_empty());
    }

    #[test]
    fn income_then_reset_restores_the_default_balance() {
        let mut engine = engine();
        engine.add_income(250.0).expect("income succeeds");
        assert_eq!(engine.wallet_balance(), 5250.0);

        engine.add_expense(lunch()).expect("add succeeds");
        let balance = engine.reset_wallet_balance().expect("reset succeeds");
        assert_eq!(balance, DEFAULT_WALLET_BALANCE);
        assert_eq!(engine.expenses().len(), 1, "reset leaves expenses alone");
    }

    #[test]
    fn state_round_trips_through_the_store() {
        let store = MemoryStore::new();
        let mut engine = LedgerEngine::open(store).expect("open");
        engine.add_income(100.0).expect("income");
        let expense = engine.add_expense(lunch()).expect("add");
        engine.add_bill("Rent", 900.0, date(28)).expect("bill");
        engine.set_budget(Category::Food, 300.0).expect("budget");

        let LedgerEngine { store, .. } = engine;
        let reopened = LedgerEngine::open(store).expect("reopen");

        assert_eq!(reopened.wallet_balance(), 5080.0);
        assert_eq!(reopened.expenses(), &[expense]);
        assert_eq!(reopened.bills_sorted().len(), 1);
        assert_eq!(reopened.budget_statuses().len(), 1);
        assert_consistent(&reopened);
    }

    #[test]
    fn bills_never_touch_the_wallet() {
        let mut engine = engine();
        let bill = engine.add_bill("Rent", 900.0, date(28)).expect("add bill");
        engine.set_bill_paid(bill.id, true).expect("pay bill");
        engine.delete_bill(bill.id).expect("delete bill");
        assert_eq!(engine.wallet_balance(), DEFAULT_WALLET_BALANCE);
    }

    #[test]
    fn bill_lookup_failures_name_the_missing_id() {
        let mut engine = engine();
        let missing = Uuid::new_v4();
        let err = engine.set_bill_paid(missing, true).expect_err("must fail");
        assert!(matches!(err, CoreError::BillNotFound(id) if id == missing));
    }

    #[test]
    fn setting_a_budget_twice_replaces_the_amount() {
        let mut engine = engine();
        engine.set_budget(Category::Food, 300.0).expect("set");
        engine.set_budget(Category::Food, 450.0).expect("replace");

        let statuses = engine.budget_statuses();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].amount, 450.0);

        engine.clear_budget(Category::Food).expect("clear");
        assert!(engine.budget_statuses().is_empty());
        engine
            .clear_budget(Category::Food)
            .expect("clearing an unset budget is a no-op");
    }

    /// Store that can be switched to reject writes, for persist-failure
    /// paths.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        failing: AtomicBool,
    }

    impl FlakyStore {
        fn fail_writes(&self) {
            self.failing.store(true, Ordering::SeqCst);
        }
    }

    impl StateStore for FlakyStore {
        fn get(&self, key: &str) -> CoreResult<Option<String>> {
            self.inner.get(key)
        }

        fn put(&self, key: &str, value: &str) -> CoreResult<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(CoreError::Storage("store rejected the write".into()));
            }
            self.inner.put(key, value)
        }
    }

    #[test]
    fn a_mutation_that_cannot_persist_reports_failure_and_keeps_state() {
        let mut engine = LedgerEngine::open(FlakyStore::default()).expect("open");
        engine.add_expense(lunch()).expect("add succeeds");

        engine.store().fail_writes();
        let err = engine
            .add_expense(ExpenseDraft::new("Coffee", 4.0, Category::Food, date(2)))
            .expect_err("persist failure must surface");
        assert!(matches!(err, CoreError::Storage(_)));

        assert_eq!(engine.wallet_balance(), 4980.0);
        assert_eq!(engine.expenses().len(), 1);
        assert_consistent(&engine);
    }
}
