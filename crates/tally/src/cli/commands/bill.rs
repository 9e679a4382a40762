//! Bill reminder commands.

use tally_domain::{Displayable, Identifiable};

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

use super::{parse_amount, parse_date, resolve_id};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "bill",
        "Track bill reminders",
        "bill <add|edit|remove|pay|unpay|list> ...",
        cmd_bill,
    )]
}

fn cmd_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: bill <add|edit|remove|pay|unpay|list>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "edit" => handle_edit(context, rest),
        "remove" => handle_remove(context, rest),
        "pay" => handle_set_paid(context, rest, true),
        "unpay" => handle_set_paid(context, rest, false),
        "list" => handle_list(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown bill subcommand `{other}`"
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, amount, due_date] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: bill add <name> <amount> <due-date>".into(),
        ));
    };
    let amount = parse_amount(amount)?;
    let due_date = parse_date(due_date)?;

    let bill = context.engine.add_bill(name, amount, due_date)?;
    output::success(&format!("Added bill {}", bill.display_label()));
    output::detail(&format!("id: {}", output::short_id(&bill.id)));
    Ok(())
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_id, name, amount, due_date] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: bill edit <id> <name> <amount> <due-date>".into(),
        ));
    };
    let id = bill_id(context, raw_id)?;
    let amount = parse_amount(amount)?;
    let due_date = parse_date(due_date)?;

    let updated = context.engine.update_bill(id, name, amount, due_date)?;
    output::success(&format!("Updated bill {}", updated.display_label()));
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw_id = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: bill remove <id>".into()))?;
    let id = bill_id(context, raw_id)?;
    let label = context
        .engine
        .bill(id)
        .map(|bill| bill.display_label())
        .unwrap_or_else(|| id.to_string());

    if context.is_interactive() && !output::confirm(&format!("Remove {label}?"))? {
        output::detail("Kept.");
        return Ok(());
    }

    context.engine.delete_bill(id)?;
    output::success(&format!("Removed bill {label}"));
    Ok(())
}

fn handle_set_paid(context: &mut ShellContext, args: &[&str], paid: bool) -> CommandResult {
    let raw_id = args.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: bill <pay|unpay> <id>".into())
    })?;
    let id = bill_id(context, raw_id)?;
    let bill = context.engine.set_bill_paid(id, paid)?;
    let state = if bill.paid { "paid" } else { "unpaid" };
    output::success(&format!("Marked {} as {state}", bill.display_label()));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let bills = context.engine.bills_sorted();
    if bills.is_empty() {
        output::detail("No bills tracked.");
        return Ok(());
    }
    let symbol = context.currency().to_string();
    for bill in bills {
        println!("{}", output::bill_row(bill, &symbol));
    }
    Ok(())
}

fn bill_id(context: &ShellContext, raw: &str) -> Result<uuid::Uuid, CommandError> {
    resolve_id(context.engine.bills().iter().map(Identifiable::id), raw, "bill")
}
