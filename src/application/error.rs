use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AppError {
    #[error("No expense with index {0}")]
    ExpenseNotFound(usize),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Nothing to update for expense {0}")]
    EmptyUpdate(usize),
}
