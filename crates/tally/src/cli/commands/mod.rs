//! CLI command definitions grouped by subject, plus shared argument
//! parsing helpers.

pub mod bill;
pub mod budget;
pub mod expense;
pub mod report;
pub mod system;
pub mod wallet;

use chrono::NaiveDate;
use uuid::Uuid;

use tally_domain::Category;

use crate::cli::{core::CommandError, registry::CommandRegistry};

pub fn build_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::default();
    for entry in wallet::definitions()
        .into_iter()
        .chain(expense::definitions())
        .chain(report::definitions())
        .chain(bill::definitions())
        .chain(budget::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
    registry
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a number")))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw}` is not a date (expected YYYY-MM-DD)"))
    })
}

pub(crate) fn parse_category(raw: &str) -> Result<Category, CommandError> {
    raw.parse::<Category>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Resolves a full id or unique prefix against a set of candidate ids.
pub(crate) fn resolve_id(
    candidates: impl IntoIterator<Item = Uuid>,
    raw: &str,
    what: &str,
) -> Result<Uuid, CommandError> {
    let needle = raw.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Err(CommandError::InvalidArguments(format!("missing {what} id")));
    }
    let matches: Vec<Uuid> = candidates
        .into_iter()
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [only] => Ok(*only),
        [] => Err(CommandError::Command(format!(
            "no {what} matches id `{raw}`"
        ))),
        _ => Err(CommandError::Command(format!(
            "{what} id `{raw}` is ambiguous, give more characters"
        ))),
    }
}
