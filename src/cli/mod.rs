mod session;

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use crate::application::ExpenseService;

pub use session::{LoopControl, Session, SessionConfig};

/// Expense Tracker - record and review the day's spending
#[derive(Parser)]
#[command(name = "expense-tracker")]
#[command(about = "An interactive, in-memory expense tracker. Nothing is saved when the session ends.")]
#[command(version)]
pub struct Cli {
    /// Currency symbol shown in front of amounts
    #[arg(long, default_value = "₹")]
    pub currency: String,

    /// Do not print a prompt before each command
    #[arg(long)]
    pub no_prompt: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Set up stderr logging. `RUST_LOG` takes precedence over `--verbose`.
    pub fn init_logging(&self) {
        let default = if self.verbose {
            "expense_tracker=debug"
        } else {
            "warn"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        // A subscriber may already be installed when embedded; keep the existing one.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Run one session over stdin/stdout. The ledger lives until this returns.
    pub fn run(self) -> Result<()> {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal() && !self.no_prompt;

        let config = SessionConfig {
            currency: self.currency,
            prompt: interactive.then(|| "expense> ".to_string()),
        };

        let mut service = ExpenseService::new();
        let mut session = Session::new(&mut service, config);
        let mut out = io::stdout().lock();
        session.run(stdin.lock(), &mut out)
    }
}
