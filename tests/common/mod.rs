// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use expense_tracker::application::{ExpenseService, NewExpense};
use expense_tracker::cli::{Session, SessionConfig};
use expense_tracker::domain::{Category, Cents};

/// Helper to parse a YYYY-MM-DD string
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

pub fn new_expense(date: &str, category: Category, amount: Cents, description: &str) -> NewExpense {
    NewExpense {
        date: parse_date(date),
        category,
        amount_cents: amount,
        description: description.to_string(),
    }
}

/// Test fixture: a service holding lunch (Food 100.00) and bus (Transport 50.00)
pub fn lunch_and_bus() -> Result<ExpenseService> {
    let mut service = ExpenseService::new();
    service.add_expense(new_expense("2024-01-01", Category::Food, 10000, "lunch"))?;
    service.add_expense(new_expense("2024-01-02", Category::Transport, 5000, "bus"))?;
    Ok(service)
}

/// Feed `input` to a prompt-less session and return everything it printed
pub fn run_session(service: &mut ExpenseService, input: &str) -> Result<String> {
    let config = SessionConfig {
        currency: "$".to_string(),
        prompt: None,
    };
    let mut out = Vec::new();
    Session::new(service, config).run(input.as_bytes(), &mut out)?;
    Ok(String::from_utf8(out)?)
}
