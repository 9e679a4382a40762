//! Domain model for recorded expenses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    category::Category,
    common::{Displayable, Identifiable},
};

/// One recorded outflow against the wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub category: Category,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(
        title: impl Into<String>,
        price: f64,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            price,
            category,
            date,
        }
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} ({})", self.title, self.category)
    }
}

/// Caller-supplied fields for a new or updated expense. Ids are assigned by
/// the engine, never by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub price: f64,
    pub category: Category,
    pub date: NaiveDate,
}

impl ExpenseDraft {
    pub fn new(
        title: impl Into<String>,
        price: f64,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            price,
            category,
            date,
        }
    }
}
