use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Category, Cents, Expense, ExpenseId, ExpenseRecord, ExpenseUpdate};

/// Sum of all expenses filed under one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Cents,
    pub count: usize,
}

/// In-memory list of expenses for one session.
///
/// Expenses keep insertion order. Their display index is their 1-based
/// position, so indices are always `1..=len()` and shift down after a delete.
/// Each expense also gets a stable [`ExpenseId`] from a counter that only
/// grows.
#[derive(Debug, Default)]
pub struct ExpenseLedger {
    expenses: Vec<Expense>,
    next_id: ExpenseId,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an expense and return its display index (`len() + 1` before the call).
    /// Amounts are not validated here.
    pub fn add(
        &mut self,
        date: NaiveDate,
        category: Category,
        amount_cents: Cents,
        description: impl Into<String>,
    ) -> usize {
        self.next_id += 1;
        self.expenses.push(Expense {
            id: self.next_id,
            date,
            category,
            amount_cents,
            description: description.into(),
        });
        self.expenses.len()
    }

    /// Remove the expense at a display index. Returns `None` and leaves the
    /// ledger untouched when no expense has that index.
    pub fn delete(&mut self, index: usize) -> Option<Expense> {
        let position = self.position(index)?;
        Some(self.expenses.remove(position))
    }

    /// Remove an expense by its stable id.
    pub fn remove(&mut self, id: ExpenseId) -> Option<Expense> {
        let position = self.expenses.iter().position(|e| e.id == id)?;
        Some(self.expenses.remove(position))
    }

    /// Edit the expense at a display index in place.
    pub fn update(&mut self, index: usize, update: ExpenseUpdate) -> Option<&Expense> {
        let position = self.position(index)?;
        let expense = &mut self.expenses[position];
        update.apply(expense);
        Some(expense)
    }

    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.position(index).map(|p| &self.expenses[p])
    }

    pub fn get_by_id(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Current display index of an expense.
    pub fn index_of(&self, id: ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| e.id == id).map(|p| p + 1)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter()
    }

    /// Snapshot of every expense paired with its display index.
    pub fn records(&self) -> Vec<ExpenseRecord> {
        self.expenses
            .iter()
            .enumerate()
            .map(|(i, expense)| ExpenseRecord {
                index: i + 1,
                expense: expense.clone(),
            })
            .collect()
    }

    pub fn total_amount(&self) -> Cents {
        self.expenses.iter().map(|e| e.amount_cents).sum()
    }

    /// Group-by-sum per category, in order of each category's first
    /// appearance. Categories without expenses are left out.
    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();

        for expense in &self.expenses {
            match totals.iter_mut().find(|t| t.category == expense.category) {
                Some(entry) => {
                    entry.total += expense.amount_cents;
                    entry.count += 1;
                }
                None => totals.push(CategoryTotal {
                    category: expense.category,
                    total: expense.amount_cents,
                    count: 1,
                }),
            }
        }

        totals
    }

    fn position(&self, index: usize) -> Option<usize> {
        (1..=self.expenses.len()).contains(&index).then(|| index - 1)
    }
}
