use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    Category, Cents, Expense, ExpenseLedger, ExpenseRecord, ExpenseUpdate, format_amount,
};

use super::{AppError, CategoryReport};

/// Session service wrapping one in-memory ledger.
/// Build one per session and hand it by reference to whatever handles input.
pub struct ExpenseService {
    session_id: Uuid,
    ledger: ExpenseLedger,
}

/// Input for a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: Category,
    pub amount_cents: Cents,
    pub description: String,
}

impl ExpenseService {
    /// Start a session with an empty ledger.
    pub fn new() -> Self {
        Self::with_ledger(ExpenseLedger::new())
    }

    pub fn with_ledger(ledger: ExpenseLedger) -> Self {
        let session_id = Uuid::new_v4();
        debug!(%session_id, expenses = ledger.len(), "session started");
        Self { session_id, ledger }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn ledger(&self) -> &ExpenseLedger {
        &self.ledger
    }

    // ========================
    // Expense operations
    // ========================

    /// Record a new expense. Amounts below zero are rejected.
    pub fn add_expense(&mut self, new: NewExpense) -> Result<ExpenseRecord, AppError> {
        validate_amount(new.amount_cents)?;
        self.check_total(0, new.amount_cents)?;

        let index = self.ledger.add(
            new.date,
            new.category,
            new.amount_cents,
            new.description,
        );
        let record = self.get_expense(index)?;

        info!(
            index,
            id = record.expense.id,
            category = %record.expense.category,
            amount = %format_amount(record.expense.amount_cents, ""),
            "expense added"
        );
        Ok(record)
    }

    pub fn list_expenses(&self) -> Vec<ExpenseRecord> {
        self.ledger.records()
    }

    pub fn get_expense(&self, index: usize) -> Result<ExpenseRecord, AppError> {
        self.ledger
            .get(index)
            .map(|expense| ExpenseRecord {
                index,
                expense: expense.clone(),
            })
            .ok_or(AppError::ExpenseNotFound(index))
    }

    /// Edit fields of an existing expense.
    pub fn update_expense(
        &mut self,
        index: usize,
        update: ExpenseUpdate,
    ) -> Result<ExpenseRecord, AppError> {
        if update.is_empty() {
            return Err(AppError::EmptyUpdate(index));
        }
        if let Some(amount) = update.amount_cents {
            validate_amount(amount)?;
            let current = self
                .ledger
                .get(index)
                .ok_or(AppError::ExpenseNotFound(index))?
                .amount_cents;
            self.check_total(current, amount)?;
        }

        let expense = self
            .ledger
            .update(index, update)
            .ok_or(AppError::ExpenseNotFound(index))?
            .clone();

        info!(index, id = expense.id, "expense updated");
        Ok(ExpenseRecord { index, expense })
    }

    /// Delete the expense at a display index. Later expenses move up by one.
    ///
    /// The ledger treats an unknown index as a no-op; here it is reported so
    /// the caller can tell the user nothing was removed.
    pub fn delete_expense(&mut self, index: usize) -> Result<Expense, AppError> {
        match self.ledger.delete(index) {
            Some(expense) => {
                info!(
                    index,
                    id = expense.id,
                    remaining = self.ledger.len(),
                    "expense deleted"
                );
                Ok(expense)
            }
            None => {
                warn!(index, size = self.ledger.len(), "delete ignored, no such index");
                Err(AppError::ExpenseNotFound(index))
            }
        }
    }

    // ========================
    // Reporting
    // ========================

    pub fn total_amount(&self) -> Cents {
        self.ledger.total_amount()
    }

    pub fn category_report(&self) -> CategoryReport {
        CategoryReport::from_totals(self.ledger.category_totals())
    }

    /// Amounts are non-negative and their total must fit in `Cents`, so every
    /// per-category sum fits as well.
    fn check_total(&self, replaced: Cents, amount: Cents) -> Result<(), AppError> {
        let fits = self
            .ledger
            .total_amount()
            .checked_sub(replaced)
            .and_then(|rest| rest.checked_add(amount))
            .is_some();
        if !fits {
            warn!(amount_cents = amount, "rejected amount, session total would overflow");
            return Err(AppError::InvalidAmount(format!(
                "{} would push the session total past {}",
                format_amount(amount, ""),
                format_amount(Cents::MAX, "")
            )));
        }
        Ok(())
    }
}

impl Default for ExpenseService {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_amount(amount_cents: Cents) -> Result<(), AppError> {
    if amount_cents < 0 {
        warn!(amount_cents, "rejected negative amount");
        return Err(AppError::InvalidAmount(
            "Amount cannot be negative".to_string(),
        ));
    }
    Ok(())
}
