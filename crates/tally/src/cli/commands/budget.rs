//! Per-category budget commands.

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

use super::{parse_amount, parse_category};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "budget",
        "Manage per-category spending limits",
        "budget <set|clear|list> ...",
        cmd_budget,
    )]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: budget <set|clear|list>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "set" => handle_set(context, rest),
        "clear" => handle_clear(context, rest),
        "list" => handle_list(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown budget subcommand `{other}`"
        ))),
    }
}

fn handle_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [category, amount] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: budget set <category> <amount>".into(),
        ));
    };
    let category = parse_category(category)?;
    let amount = parse_amount(amount)?;

    let budget = context.engine.set_budget(category, amount)?;
    let symbol = context.currency().to_string();
    output::success(&format!(
        "Budget for {} set to {}",
        budget.category,
        output::format_currency(&symbol, budget.amount),
    ));
    Ok(())
}

fn handle_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: budget clear <category>".into())
    })?;
    let category = parse_category(raw)?;
    context.engine.clear_budget(category)?;
    output::success(&format!("Budget for {category} cleared"));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let statuses = context.engine.budget_statuses();
    if statuses.is_empty() {
        output::detail("No budgets set.");
        return Ok(());
    }
    let symbol = context.currency().to_string();
    for status in &statuses {
        println!("{}", output::budget_row(status, &symbol));
    }
    Ok(())
}
