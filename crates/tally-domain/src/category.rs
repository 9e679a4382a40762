//! The closed set of spending categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Classifies an expense for aggregation and display.
///
/// The set is closed: aggregation iterates [`Category::ALL`] exhaustively,
/// so no expense can ever fall outside the reported totals.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Entertainment,
    Travel,
    Study,
    Utensils,
    Electronics,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Entertainment,
        Category::Travel,
        Category::Study,
        Category::Utensils,
        Category::Electronics,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Food => "Food",
            Category::Entertainment => "Entertainment",
            Category::Travel => "Travel",
            Category::Study => "Study",
            Category::Utensils => "Utensils",
            Category::Electronics => "Electronics",
        };
        f.write_str(label)
    }
}

/// Raised when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category `{}`", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "food" => Ok(Category::Food),
            "entertainment" => Ok(Category::Entertainment),
            "travel" => Ok(Category::Travel),
            "study" => Ok(Category::Study),
            "utensils" => Ok(Category::Utensils),
            "electronics" => Ok(Category::Electronics),
            _ => Err(UnknownCategory(value.trim().to_string())),
        }
    }
}
