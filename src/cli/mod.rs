//! `pocketbook_cli` command surface.

pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pocketbook_config::ConfigManager;
use pocketbook_core::CurrencyFormatter;
use pocketbook_domain::{Displayable, TransactionDraft, TransactionKind, YearMonth};

use crate::{app::Pocketbook, errors::Result};

#[derive(Parser)]
#[command(
    name = "pocketbook",
    about = "Record income and expenses and see where each month's money went."
)]
pub struct Cli {
    /// Directory holding the transaction file (overrides the configured one)
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
    /// Path to config.json (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new income or expense.
    Add {
        #[arg(long)]
        name: String,
        /// Positive amount, e.g. 12.50
        #[arg(long)]
        amount: String,
        #[arg(long = "type", value_enum)]
        kind: KindArg,
        /// Category key, see `categories`
        #[arg(long)]
        category: String,
    },
    /// List every transaction, newest first.
    List,
    /// Break a month's expenses down by category.
    Summary {
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
        /// Months to move from the selected month, e.g. -1 for the previous one
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    /// Show income, expense and net totals.
    Balance,
    /// List the category catalog.
    Categories,
    /// Erase every stored transaction.
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::new(path.clone()),
        None => ConfigManager::with_default_location()?,
    };
    let mut config = manager.load()?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = Some(dir);
    }
    if !config.color_enabled {
        colored::control::set_override(false);
    }
    let book = Pocketbook::open(config)?;

    match cli.command {
        Commands::Add {
            name,
            amount,
            kind,
            category,
        } => {
            let draft = TransactionDraft::new(name, amount, kind.into(), category);
            let record = book.register(&draft)?;
            if cli.json {
                print_json(&record);
            } else {
                output::success(format!(
                    "Recorded {} for {}",
                    record.display_label(),
                    book.formatter().format_amount(record.amount)
                ));
            }
        }
        Commands::List => {
            let history = book.history()?;
            if cli.json {
                print_json(&history);
            } else if history.is_empty() {
                output::info("No transactions recorded yet.");
            } else {
                output::section("Transactions");
                for line in output::history_lines(&history, book.catalog()) {
                    output::info(line);
                }
            }
        }
        Commands::Summary { month, offset } => {
            let base = match month {
                Some(raw) => raw.parse::<YearMonth>()?,
                None => book.current_month(),
            };
            let summary = book.monthly_summary(base.shift(offset))?;
            if cli.json {
                print_json(&summary);
            } else {
                output::section(summary.month.label());
                for line in output::summary_lines(&summary) {
                    output::info(line);
                }
            }
        }
        Commands::Balance => {
            let balance = book.balance()?;
            if cli.json {
                print_json(&balance);
            } else {
                output::section("Balance");
                for line in output::balance_lines(&balance) {
                    output::info(line);
                }
            }
        }
        Commands::Categories => {
            if cli.json {
                print_json(&book.catalog().iter().collect::<Vec<_>>());
            } else {
                output::section("Categories");
                for line in output::catalog_lines(book.catalog()) {
                    output::info(line);
                }
            }
        }
        Commands::Clear { yes } => {
            book.clear(yes)?;
            output::success("All transactions cleared.");
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => tracing::error!(error = %err, "failed to render JSON output"),
    }
}
