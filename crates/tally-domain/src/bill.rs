//! Domain model for bill reminders.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, Identifiable};

/// A payable reminder. Bills never touch the wallet balance; marking one
/// paid only flips its flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid: bool,
}

impl Bill {
    pub fn new(name: impl Into<String>, amount: f64, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            due_date,
            paid: false,
        }
    }

    /// Display ordering: unpaid bills first, then ascending due date.
    pub fn display_order(a: &Bill, b: &Bill) -> Ordering {
        a.paid.cmp(&b.paid).then(a.due_date.cmp(&b.due_date))
    }
}

impl Identifiable for Bill {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Bill {
    fn display_label(&self) -> String {
        format!("{} (due {})", self.name, self.due_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, day).expect("valid date")
    }

    #[test]
    fn unpaid_bills_sort_before_paid_ones() {
        let mut paid = Bill::new("Rent", 900.0, date(1));
        paid.paid = true;
        let upcoming = Bill::new("Power", 60.0, date(20));
        let overdue = Bill::new("Water", 30.0, date(5));

        let mut bills = vec![paid.clone(), upcoming.clone(), overdue.clone()];
        bills.sort_by(Bill::display_order);

        assert_eq!(bills[0].name, "Water");
        assert_eq!(bills[1].name, "Power");
        assert_eq!(bills[2].name, "Rent");
    }
}
