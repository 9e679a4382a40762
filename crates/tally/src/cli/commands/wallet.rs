//! Wallet balance commands.

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

use super::parse_amount;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "wallet",
            "Show or reset the wallet balance",
            "wallet [reset]",
            cmd_wallet,
        ),
        CommandEntry::new(
            "income",
            "Add income to the wallet",
            "income <amount>",
            cmd_income,
        ),
    ]
}

fn cmd_wallet(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_ascii_lowercase()).as_deref() {
        None => {
            let symbol = context.currency().to_string();
            let summary = context.engine.summary();
            println!(
                "Wallet balance: {}",
                output::format_currency(&symbol, context.engine.wallet_balance())
            );
            output::detail(&format!(
                "Total spent: {} across {} expense(s)",
                output::format_currency(&symbol, summary.total_expenses),
                context.engine.expenses().len(),
            ));
            Ok(())
        }
        Some("reset") => {
            let balance = context.engine.reset_wallet_balance()?;
            let symbol = context.currency().to_string();
            output::success(&format!(
                "Wallet reset to {}",
                output::format_currency(&symbol, balance)
            ));
            Ok(())
        }
        Some(_) => Err(CommandError::InvalidArguments(
            "usage: wallet [reset]".into(),
        )),
    }
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: income <amount>".into()))?;
    let amount = parse_amount(raw)?;
    let balance = context.engine.add_income(amount)?;
    let symbol = context.currency().to_string();
    output::success(&format!(
        "Added {}, balance is now {}",
        output::format_currency(&symbol, amount),
        output::format_currency(&symbol, balance),
    ));
    Ok(())
}
