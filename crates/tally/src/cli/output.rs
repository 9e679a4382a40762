//! Rendering helpers: colored lines, currency formatting, chart bars.

use colored::Colorize;
use uuid::Uuid;

use tally_domain::{Bill, BudgetStatus, CategoryShare, Expense, SpendingSummary};

use crate::cli::core::CommandError;

const BAR_WIDTH: usize = 28;
const TITLE_WIDTH: usize = 24;

pub fn success(message: &str) {
    println!("{}", message.green());
}

pub fn detail(message: &str) {
    println!("{}", message.dimmed());
}

pub fn error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

pub fn confirm(prompt: &str) -> Result<bool, CommandError> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|err| CommandError::Command(err.to_string()))
}

/// First eight characters of the hyphenated id, enough to address entries
/// from the command line.
pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Formats an amount the way the tracker UI does: `$1,234.56`.
pub fn format_currency(symbol: &str, amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;
    let body = format!("{symbol}{}.{fraction:02}", group_thousands(whole));
    if negative {
        format!("-{body}")
    } else {
        body
    }
}

pub fn expense_row(expense: &Expense, symbol: &str) -> String {
    format!(
        "{}  {}  {:<title$} {:<13} {:>12}",
        short_id(&expense.id).dimmed(),
        expense.date,
        truncate(&expense.title, TITLE_WIDTH),
        expense.category.to_string(),
        format_currency(symbol, expense.price),
        title = TITLE_WIDTH,
    )
}

pub fn bill_row(bill: &Bill, symbol: &str) -> String {
    let status = if bill.paid {
        "paid".green()
    } else {
        "due".yellow()
    };
    format!(
        "{}  {}  {:<title$} {:>12}  {}",
        short_id(&bill.id).dimmed(),
        bill.due_date,
        truncate(&bill.name, TITLE_WIDTH),
        format_currency(symbol, bill.amount),
        status,
        title = TITLE_WIDTH,
    )
}

pub fn budget_row(status: &BudgetStatus, symbol: &str) -> String {
    let remaining = if status.is_over_budget() {
        format!("{} over", format_currency(symbol, -status.remaining))
            .red()
            .to_string()
    } else {
        format!("{} left", format_currency(symbol, status.remaining))
    };
    format!(
        "{:<13} limit {:>10}  spent {:>10}  {}",
        status.category.to_string(),
        format_currency(symbol, status.amount),
        format_currency(symbol, status.spent),
        remaining,
    )
}

/// One bar per category, scaled against the largest category total.
pub fn chart_rows(summary: &SpendingSummary, symbol: &str) -> Vec<String> {
    summary
        .totals
        .iter()
        .map(|(category, amount)| {
            let filled = if summary.max_category_amount > 0.0 {
                ((amount / summary.max_category_amount) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            format!(
                "{:<13} {:<bar$} {:>12}",
                category.to_string(),
                "#".repeat(filled),
                format_currency(symbol, amount),
                bar = BAR_WIDTH,
            )
        })
        .collect()
}

pub fn share_row(share: &CategoryShare, symbol: &str) -> String {
    format!(
        "{:<13} {:>12}  {:>5.1}%",
        share.category.to_string(),
        format_currency(symbol, share.amount),
        share.percent,
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut shortened: String = text.chars().take(max.saturating_sub(1)).collect();
        shortened.push('…');
        shortened
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_formatting_groups_thousands() {
        assert_eq!(format_currency("$", 0.0), "$0.00");
        assert_eq!(format_currency("$", 20.0), "$20.00");
        assert_eq!(format_currency("$", 5080.0), "$5,080.00");
        assert_eq!(format_currency("$", 1234567.891), "$1,234,567.89");
        assert_eq!(format_currency("$", -42.5), "-$42.50");
    }

    #[test]
    fn chart_bars_scale_to_the_largest_category() {
        use chrono::NaiveDate;
        use tally_domain::Category;

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let expenses = vec![
            Expense::new("Groceries", 100.0, Category::Food, date),
            Expense::new("Train", 50.0, Category::Travel, date),
        ];
        let summary = SpendingSummary::of(&expenses);
        let rows = chart_rows(&summary, "$");

        assert_eq!(rows.len(), Category::ALL.len());
        let food = rows.iter().find(|row| row.starts_with("Food")).expect("food row");
        let travel = rows
            .iter()
            .find(|row| row.starts_with("Travel"))
            .expect("travel row");
        assert_eq!(food.matches('#').count(), BAR_WIDTH);
        assert_eq!(travel.matches('#').count(), BAR_WIDTH / 2);
    }
}
