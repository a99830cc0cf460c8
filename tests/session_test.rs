mod common;

use anyhow::Result;
use common::{lunch_and_bus, run_session};
use expense_tracker::application::ExpenseService;
use expense_tracker::cli::{LoopControl, Session, SessionConfig};
use expense_tracker::domain::Category;
use tempfile::TempDir;

#[test]
fn test_add_and_view() -> Result<()> {
    let mut service = ExpenseService::new();

    let output = run_session(
        &mut service,
        "add 100 -c food --date 2024-01-01 -d lunch\n\
         add 50 --category Transport --date 2024-01-02 -d \"bus ride\"\n\
         view\n",
    )?;

    assert!(output.contains("Expense added successfully: #1 Food $100.00 on 2024-01-01"));
    assert!(output.contains("Expense added successfully: #2 Transport $50.00 on 2024-01-02"));
    assert!(output.contains("INDEX"));
    assert!(output.contains("bus ride"));
    assert!(output.contains("Total Expenses: $150.00"));

    let records = service.list_expenses();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].expense.category, Category::Transport);
    assert_eq!(records[1].expense.description, "bus ride");

    Ok(())
}

#[test]
fn test_delete_and_renumber() -> Result<()> {
    let mut service = lunch_and_bus()?;

    let output = run_session(&mut service, "delete 1\ntotal\n")?;

    assert!(output.contains("Expense deleted successfully: Food $100.00"));
    assert!(output.contains("Total Expenses: $50.00"));
    assert_eq!(service.list_expenses()[0].index, 1);
    assert_eq!(service.list_expenses()[0].expense.description, "bus");

    Ok(())
}

#[test]
fn test_errors_do_not_end_session() -> Result<()> {
    let mut service = lunch_and_bus()?;

    let output = run_session(
        &mut service,
        "delete 7\n\
         add abc\n\
         add 5 -c groceries\n\
         add -5\n\
         frobnicate\n\
         add \"unterminated\n\
         total\n",
    )?;

    assert!(output.contains("Error: No expense with index 7"));
    assert!(output.contains("unknown category 'groceries'"));
    assert!(output.contains("amount cannot be negative"));
    assert!(output.contains("Total Expenses: $150.00"));
    assert_eq!(service.list_expenses().len(), 2);

    Ok(())
}

#[test]
fn test_edit_command() -> Result<()> {
    let mut service = lunch_and_bus()?;

    let output = run_session(&mut service, "edit 2 -a 75.5 -c other -d \"late bus\"\n")?;

    assert!(output.contains("Changes saved for expense #2."));
    let bus = &service.list_expenses()[1].expense;
    assert_eq!(bus.amount_cents, 7550);
    assert_eq!(bus.category, Category::Other);
    assert_eq!(bus.description, "late bus");

    let output = run_session(&mut service, "edit 2\n")?;
    assert!(output.contains("Error: Nothing to update for expense 2"));

    Ok(())
}

#[test]
fn test_visualize() -> Result<()> {
    let mut empty = ExpenseService::new();
    let output = run_session(&mut empty, "chart\n")?;
    assert!(output.contains("No expenses to visualize!"));

    let mut service = lunch_and_bus()?;
    let output = run_session(&mut service, "visualize\n")?;

    assert!(output.contains("Expense Breakdown"));
    let food = output.lines().find(|l| l.starts_with("Food")).unwrap();
    assert!(food.contains("$100.00"));
    assert!(food.contains("66.7%"));
    assert!(food.ends_with(&"#".repeat(20)));
    let transport = output.lines().find(|l| l.starts_with("Transport")).unwrap();
    assert!(transport.contains("33.3%"));

    Ok(())
}

#[test]
fn test_home() -> Result<()> {
    let mut empty = ExpenseService::new();
    let output = run_session(&mut empty, "home\nlist\n")?;
    assert!(output.contains("No expenses recorded yet."));
    assert!(output.contains("No expenses to display!"));

    let mut service = lunch_and_bus()?;
    let output = run_session(&mut service, "home\n")?;
    assert!(output.contains("Total Expenses: $150.00"));
    assert!(output.contains("lunch"));
    assert!(output.contains("Expense Breakdown"));

    Ok(())
}

#[test]
fn test_quit_stops_reading() -> Result<()> {
    let mut service = ExpenseService::new();

    run_session(&mut service, "add 1\nquit\nadd 2\n")?;
    assert_eq!(service.list_expenses().len(), 1);

    let mut session = Session::new(&mut service, SessionConfig::default());
    let mut out = Vec::new();
    assert_eq!(session.execute("exit", &mut out)?, LoopControl::Exit);
    assert_eq!(session.execute("   ", &mut out)?, LoopControl::Continue);
    assert!(out.is_empty());

    Ok(())
}

#[test]
fn test_add_defaults_to_food() -> Result<()> {
    let mut service = ExpenseService::new();
    run_session(&mut service, "add 12.5\n")?;

    let expense = &service.list_expenses()[0].expense;
    assert_eq!(expense.category, Category::Food);
    assert_eq!(expense.amount_cents, 1250);
    assert!(expense.description.is_empty());

    Ok(())
}

#[test]
fn test_export_commands() -> Result<()> {
    let mut service = lunch_and_bus()?;
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("out.csv");

    let output = run_session(
        &mut service,
        &format!("export csv -o \"{}\"\nexport csv\n", path.display()),
    )?;

    assert!(output.contains("Exported 2 expenses to"));
    assert!(output.contains("2,2024-01-02,Transport,50.00,bus"));

    let written = std::fs::read_to_string(&path)?;
    assert!(written.starts_with("index,date,category,amount,description"));
    assert_eq!(written.lines().count(), 3);

    let output = run_session(&mut service, "export json\n")?;
    assert!(output.contains("\"session_id\""));

    let missing_dir = temp_dir.path().join("missing").join("out.csv");
    let output = run_session(
        &mut service,
        &format!("export csv -o \"{}\"\n", missing_dir.display()),
    )?;
    assert!(output.contains("Error: Failed to create output file"));

    Ok(())
}

#[test]
fn test_amount_at_limit() -> Result<()> {
    let mut service = ExpenseService::new();

    let output = run_session(
        &mut service,
        "add 92233720368547758.07 -c other\n\
         add 1\n\
         add 92233720368547758.08\n\
         total\n",
    )?;

    assert!(output.contains("Expense added successfully: #1 Other $92233720368547758.07"));
    assert!(output.contains("Error: Invalid amount: 1.00 would push the session total past"));
    assert!(output.contains("invalid amount '92233720368547758.08'"));
    assert!(output.contains("Total Expenses: $92233720368547758.07"));
    assert_eq!(service.list_expenses().len(), 1);

    Ok(())
}

#[test]
fn test_add_rejects_garbage_before_amount() -> Result<()> {
    let mut service = ExpenseService::new();

    let output = run_session(&mut service, "add abc12\nadd x.5\nadd $7\n")?;

    assert!(output.contains("invalid amount 'abc12'"));
    assert!(output.contains("invalid amount 'x.5'"));
    assert_eq!(service.list_expenses().len(), 1);
    assert_eq!(service.total_amount(), 700);

    Ok(())
}
