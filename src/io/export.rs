use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use uuid::Uuid;

use crate::application::{CategoryReport, ExpenseService};
use crate::domain::{ExpenseRecord, format_amount};

/// Point-in-time copy of a session for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub session_id: Uuid,
    pub exported_at: DateTime<Utc>,
    pub expenses: Vec<ExpenseRecord>,
    pub report: CategoryReport,
}

/// Writes the session's expenses out as CSV or JSON
pub struct Exporter<'a> {
    service: &'a ExpenseService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a ExpenseService) -> Self {
        Self { service }
    }

    /// Export the expense table to CSV. Returns the number of rows written.
    pub fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let records = self.service.list_expenses();
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["index", "date", "category", "amount", "description"])?;

        for record in &records {
            let expense = &record.expense;
            csv_writer.write_record([
                record.index.to_string(),
                expense.date.format("%Y-%m-%d").to_string(),
                expense.category.to_string(),
                format_amount(expense.amount_cents, ""),
                expense.description.clone(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(records.len())
    }

    /// Export the whole session, including the category report, as pretty JSON.
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            session_id: self.service.session_id(),
            exported_at: Utc::now(),
            expenses: self.service.list_expenses(),
            report: self.service.category_report(),
        };

        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(snapshot)
    }
}
