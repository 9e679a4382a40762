//! Expense recording, editing, and browsing commands.

use tally_domain::{Displayable, ExpenseDraft, Identifiable};

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

use super::{parse_amount, parse_category, parse_date, resolve_id, today};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "expense",
        "Record, edit, and browse expenses",
        "expense <add|edit|remove|list> ...",
        cmd_expense,
    )]
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: expense <add|edit|remove|list>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "edit" => handle_edit(context, rest),
        "remove" => handle_remove(context, rest),
        "list" => handle_list(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown expense subcommand `{other}`"
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [title, price, category, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: expense add <title> <price> <category> [date]".into(),
        ));
    };
    let price = parse_amount(price)?;
    let category = parse_category(category)?;
    // Date defaulting is a presentation concern; the engine always gets one.
    let date = match rest.first() {
        Some(raw) => parse_date(raw)?,
        None => today(),
    };

    let expense = context
        .engine
        .add_expense(ExpenseDraft::new(*title, price, category, date))?;
    let symbol = context.currency().to_string();
    output::success(&format!(
        "Recorded {} at {}",
        expense.display_label(),
        output::format_currency(&symbol, expense.price),
    ));
    output::detail(&format!("id: {}", output::short_id(&expense.id)));
    Ok(())
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_id, title, price, category, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: expense edit <id> <title> <price> <category> [date]".into(),
        ));
    };
    let id = resolve_id(
        context.engine.expenses().iter().map(Identifiable::id),
        raw_id,
        "expense",
    )?;
    let price = parse_amount(price)?;
    let category = parse_category(category)?;
    let date = match rest.first() {
        Some(raw) => parse_date(raw)?,
        None => context
            .engine
            .expense(id)
            .map(|expense| expense.date)
            .unwrap_or_else(today),
    };

    let updated = context
        .engine
        .update_expense(id, ExpenseDraft::new(*title, price, category, date))?;
    let symbol = context.currency().to_string();
    output::success(&format!(
        "Updated {} to {}",
        updated.display_label(),
        output::format_currency(&symbol, updated.price),
    ));
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw_id = args.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: expense remove <id>".into())
    })?;
    let id = resolve_id(
        context.engine.expenses().iter().map(Identifiable::id),
        raw_id,
        "expense",
    )?;
    let label = context
        .engine
        .expense(id)
        .map(|expense| expense.display_label())
        .unwrap_or_else(|| id.to_string());

    if context.is_interactive() && !output::confirm(&format!("Remove {label}?"))? {
        output::detail("Kept.");
        return Ok(());
    }

    context.engine.delete_expense(id)?;
    output::success(&format!("Removed {label}, price refunded to the wallet"));
    Ok(())
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let by_date = matches!(
        args.first().map(|arg| arg.to_ascii_lowercase()).as_deref(),
        Some("date")
    );
    let rows: Vec<_> = if by_date {
        context.engine.expenses_by_date()
    } else {
        context.engine.expenses().iter().collect()
    };

    if rows.is_empty() {
        output::detail("No expenses recorded.");
        return Ok(());
    }
    let symbol = context.currency().to_string();
    for expense in rows {
        println!("{}", output::expense_row(expense, &symbol));
    }
    Ok(())
}
