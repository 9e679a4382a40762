//! tally-domain
//!
//! Pure domain models (Ledger, Expense, Category, Bill, budgets, derived
//! summaries). No I/O, no CLI, no storage. Only data types and the
//! derived-value computations defined over them.

pub mod bill;
pub mod budget;
pub mod category;
pub mod common;
pub mod expense;
pub mod ledger;
pub mod summary;

pub use bill::*;
pub use budget::*;
pub use category::*;
pub use common::*;
pub use expense::*;
pub use ledger::*;
pub use summary::*;
