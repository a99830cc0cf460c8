use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Category, Cents};

/// Session-unique identifier. Assigned once, never reused, never renumbered.
pub type ExpenseId = u64;

/// A single spending entry as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    /// Day the money was spent
    pub date: NaiveDate,
    pub category: Category,
    /// Amount in cents (zero or more)
    pub amount_cents: Cents,
    /// Free text, may be empty
    pub description: String,
}

/// An expense together with its current 1-based display index.
///
/// The index is a position, not an identity: deleting an earlier expense
/// shifts it down by one. Use `expense.id` to refer to the same expense
/// across deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub index: usize,
    #[serde(flatten)]
    pub expense: Expense,
}

/// Partial edit of an expense. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseUpdate {
    pub date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub amount_cents: Option<Cents>,
    pub description: Option<String>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.category.is_none()
            && self.amount_cents.is_none()
            && self.description.is_none()
    }

    pub(crate) fn apply(self, expense: &mut Expense) {
        if let Some(date) = self.date {
            expense.date = date;
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(amount) = self.amount_cents {
            expense.amount_cents = amount;
        }
        if let Some(description) = self.description {
            expense.description = description;
        }
    }
}
