use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};

use crate::application::{CategoryReport, ExpenseService, NewExpense};
use crate::domain::{Category, Cents, ExpenseRecord, ExpenseUpdate, format_amount, parse_amount};
use crate::io::Exporter;

/// Width of a 100% bar in the category chart
const CHART_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Per-session display settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub currency: String,
    /// Printed before each command; `None` for piped input
    pub prompt: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            currency: "₹".to_string(),
            prompt: None,
        }
    }
}

// One command line typed into the session; the first word picks the command.
#[derive(Parser)]
#[command(
    multicall = true,
    subcommand_required = true,
    about = "Expense Tracker commands"
)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Show the total, the expense table and the category breakdown
    Home,

    /// Record a new expense
    Add {
        /// Amount spent (e.g., "12.50" or "12")
        #[arg(value_parser = parse_amount, allow_negative_numbers = true)]
        amount: Cents,

        /// Category: food, transport, entertainment, utilities, other
        #[arg(short, long, default_value_t = Category::Food)]
        category: Category,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Description of the expense
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List all expenses with their index
    #[command(visible_alias = "list")]
    View,

    /// Change fields of an expense
    Edit {
        /// Index shown by `view`
        index: usize,

        /// New amount
        #[arg(short, long, value_parser = parse_amount, allow_negative_numbers = true)]
        amount: Option<Cents>,

        /// New category
        #[arg(short, long)]
        category: Option<Category>,

        /// New date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete an expense; later expenses move up one index
    Delete {
        /// Index shown by `view`
        index: usize,
    },

    /// Chart spending per category
    #[command(visible_alias = "chart")]
    Visualize,

    /// Show the total of all expenses
    Total,

    /// Export expenses as CSV or JSON
    Export {
        /// Output format
        #[arg(value_enum)]
        format: ExportFormat,

        /// Output file (printed inline if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Leave the session (all expenses are discarded)
    #[command(visible_alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

/// Line-oriented command loop over a borrowed [`ExpenseService`].
pub struct Session<'a> {
    service: &'a mut ExpenseService,
    config: SessionConfig,
}

impl<'a> Session<'a> {
    pub fn new(service: &'a mut ExpenseService, config: SessionConfig) -> Self {
        Self { service, config }
    }

    /// Read commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        if self.config.prompt.is_some() {
            writeln!(
                out,
                "Expense Tracker. Type `help` for commands, `quit` to leave."
            )?;
        }

        let mut line = String::new();
        loop {
            if let Some(prompt) = &self.config.prompt {
                write!(out, "{prompt}")?;
                out.flush()?;
            }

            line.clear();
            if input
                .read_line(&mut line)
                .context("Failed to read command")?
                == 0
            {
                break;
            }

            if self.execute(&line, out)? == LoopControl::Exit {
                break;
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Run a single command line. Bad input is reported on `out` and the
    /// session carries on; only failures to write to `out` are returned.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<LoopControl> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                writeln!(out, "Error: {err}")?;
                return Ok(LoopControl::Continue);
            }
        };
        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = match SessionLine::try_parse_from(tokens) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                write!(out, "{}", err.render())?;
                return Ok(LoopControl::Continue);
            }
        };

        match self.dispatch(command, out) {
            Ok(control) => Ok(control),
            Err(err) => {
                writeln!(out, "Error: {err:#}")?;
                Ok(LoopControl::Continue)
            }
        }
    }

    fn dispatch<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> Result<LoopControl> {
        let currency = self.config.currency.as_str();

        match command {
            SessionCommand::Home => run_home(self.service, currency, out)?,

            SessionCommand::Add {
                amount,
                category,
                date,
                description,
            } => {
                let record = self.service.add_expense(NewExpense {
                    date: date.unwrap_or_else(|| Local::now().date_naive()),
                    category,
                    amount_cents: amount,
                    description,
                })?;
                writeln!(
                    out,
                    "Expense added successfully: #{} {} {} on {}",
                    record.index,
                    record.expense.category,
                    format_amount(record.expense.amount_cents, currency),
                    record.expense.date.format("%Y-%m-%d")
                )?;
            }

            SessionCommand::View => {
                let records = self.service.list_expenses();
                if records.is_empty() {
                    writeln!(out, "No expenses to display!")?;
                } else {
                    render_table(&records, currency, out)?;
                    writeln!(out)?;
                    render_total(self.service.total_amount(), currency, out)?;
                }
            }

            SessionCommand::Edit {
                index,
                amount,
                category,
                date,
                description,
            } => {
                let update = ExpenseUpdate {
                    date,
                    category,
                    amount_cents: amount,
                    description,
                };
                let record = self.service.update_expense(index, update)?;
                writeln!(out, "Changes saved for expense #{}.", record.index)?;
            }

            SessionCommand::Delete { index } => {
                let expense = self.service.delete_expense(index)?;
                writeln!(
                    out,
                    "Expense deleted successfully: {} {}",
                    expense.category,
                    format_amount(expense.amount_cents, currency)
                )?;
            }

            SessionCommand::Visualize => {
                let report = self.service.category_report();
                if report.is_empty() {
                    writeln!(out, "No expenses to visualize!")?;
                } else {
                    render_chart(&report, currency, out)?;
                }
            }

            SessionCommand::Total => render_total(self.service.total_amount(), currency, out)?,

            SessionCommand::Export { format, output } => {
                run_export(self.service, format, output, out)?;
            }

            SessionCommand::Quit => return Ok(LoopControl::Exit),
        }

        Ok(LoopControl::Continue)
    }
}

fn run_home<W: Write>(service: &ExpenseService, currency: &str, out: &mut W) -> Result<()> {
    writeln!(out, "Welcome to Expense Tracker!")?;

    if service.ledger().is_empty() {
        writeln!(
            out,
            "No expenses recorded yet. Use `add` to record your first expense."
        )?;
        return Ok(());
    }

    render_total(service.total_amount(), currency, out)?;
    writeln!(out)?;
    render_table(&service.list_expenses(), currency, out)?;
    writeln!(out)?;
    render_chart(&service.category_report(), currency, out)
}

fn run_export<W: Write>(
    service: &ExpenseService,
    format: ExportFormat,
    output: Option<PathBuf>,
    out: &mut W,
) -> Result<()> {
    let exporter = Exporter::new(service);

    let Some(path) = output else {
        match format {
            ExportFormat::Csv => exporter.export_expenses_csv(&mut *out)?,
            ExportFormat::Json => exporter.export_json(&mut *out)?.expenses.len(),
        };
        return Ok(());
    };

    let file = File::create(&path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    let count = match format {
        ExportFormat::Csv => exporter.export_expenses_csv(writer)?,
        ExportFormat::Json => exporter.export_json(writer)?.expenses.len(),
    };
    writeln!(out, "Exported {} expenses to {}", count, path.display())?;
    Ok(())
}

fn render_table<W: Write>(records: &[ExpenseRecord], currency: &str, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "{:<6} {:<10} {:<13} {:>12}  {}",
        "INDEX", "DATE", "CATEGORY", "AMOUNT", "DESCRIPTION"
    )?;
    writeln!(out, "{}", "-".repeat(72))?;

    for record in records {
        let expense = &record.expense;
        writeln!(
            out,
            "{:<6} {:<10} {:<13} {:>12}  {}",
            record.index,
            expense.date.format("%Y-%m-%d").to_string(),
            expense.category,
            format_amount(expense.amount_cents, currency),
            truncate(&expense.description, 28)
        )?;
    }
    Ok(())
}

fn render_total<W: Write>(total: Cents, currency: &str, out: &mut W) -> Result<()> {
    writeln!(out, "Total Expenses: {}", format_amount(total, currency))?;
    Ok(())
}

fn render_chart<W: Write>(report: &CategoryReport, currency: &str, out: &mut W) -> Result<()> {
    writeln!(out, "Expense Breakdown")?;
    for summary in &report.categories {
        writeln!(
            out,
            "{:<13} {:>12} {:>5.1}%  {}",
            summary.category,
            format_amount(summary.total, currency),
            summary.percentage,
            "#".repeat(bar_width(summary.percentage))
        )?;
    }
    Ok(())
}

fn bar_width(percentage: f64) -> usize {
    (percentage.clamp(0.0, 100.0) / 100.0 * CHART_WIDTH as f64).round() as usize
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
}
