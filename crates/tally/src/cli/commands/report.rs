//! Spending report: category chart, shares, and largest expenses.

use crate::cli::core::CommandResult;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

const TOP_EXPENSE_COUNT: usize = 3;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "report",
        "Show spending aggregates by category",
        "report",
        cmd_report,
    )]
}

fn cmd_report(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let symbol = context.currency().to_string();
    let summary = context.engine.summary();

    println!(
        "Wallet balance: {}",
        output::format_currency(&symbol, context.engine.wallet_balance())
    );
    println!(
        "Total spent:    {}",
        output::format_currency(&symbol, summary.total_expenses)
    );
    println!();

    for row in output::chart_rows(&summary, &symbol) {
        println!("{row}");
    }

    let shares = context.engine.category_shares();
    if !shares.is_empty() {
        println!();
        println!("Breakdown:");
        for share in &shares {
            println!("{}", output::share_row(share, &symbol));
        }
    }

    let top = context.engine.top_expenses(TOP_EXPENSE_COUNT);
    if !top.is_empty() {
        println!();
        println!("Largest expenses:");
        for expense in top {
            println!("{}", output::expense_row(expense, &symbol));
        }
    }
    Ok(())
}
