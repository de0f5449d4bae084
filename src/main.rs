//! caixa - decimal-safe money CLI for a small-business back office
//!
//! Entry point for the caixa application.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use caixa::cli::{
    handle_expense_command, handle_invoice_command, handle_money_command, handle_order_command,
    handle_report_command, ExpenseCommands, InvoiceCommands, MoneyCommands, OrderCommands,
    ReportCommands,
};
use caixa::config::{paths::CaixaPaths, settings::Settings};
use caixa::storage::Storage;

#[derive(Parser)]
#[command(
    name = "caixa",
    version,
    about = "Decimal-safe money handling for expenses, invoices and service orders",
    long_about = "caixa keeps every monetary value in whole cents, so totals, \
                  balances and margins never pick up floating-point drift. \
                  Data lives in JSON files under CAIXA_DATA_DIR or the platform \
                  config directory."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the decimal engine directly
    #[command(subcommand)]
    Money(MoneyCommands),

    /// Manage expenses
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Manage supplier invoices and their payments
    #[command(subcommand)]
    Invoice(InvoiceCommands),

    /// Manage service orders and their costing
    #[command(subcommand, alias = "os")]
    Order(OrderCommands),

    /// Generate reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show configuration
    Config {
        /// Write the current settings to the settings file
        #[arg(long)]
        save: bool,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let paths = CaixaPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    settings.logging.init();

    tracing::debug!(base_dir = %paths.base_dir().display(), "starting");

    // The engine needs no stored data
    let command = match cli.command {
        Some(Commands::Money(cmd)) => {
            return Ok(if handle_money_command(cmd) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }
        Some(command) => command,
        None => {
            println!("caixa - decimal-safe money for the back office");
            println!();
            println!("Run 'caixa --help' for usage information.");
            return Ok(ExitCode::SUCCESS);
        }
    };

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match command {
        Commands::Money(_) => {}
        Commands::Expense(cmd) => handle_expense_command(&storage, &settings, cmd)?,
        Commands::Invoice(cmd) => handle_invoice_command(&storage, &settings, cmd)?,
        Commands::Order(cmd) => handle_order_command(&storage, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::Config { save } => {
            if save {
                settings.save(&paths)?;
                println!("Settings written to {}", paths.settings_file().display());
                println!();
            }
            println!("caixa configuration");
            println!("===================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Logging:         {} ({})",
                settings.logging.level, settings.logging.format
            );
        }
        Commands::Audit { limit } => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
