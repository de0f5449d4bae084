//! Report CLI commands

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_monthly_report, DisplayStyle};
use crate::error::{CaixaError, CaixaResult};
use crate::reports::MonthlyReport;
use crate::services::parse_month;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Monthly summary of expenses and invoices
    Monthly {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Write the report as CSV to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> CaixaResult<()> {
    match cmd {
        ReportCommands::Monthly { month, output } => {
            let (year, month) = match month {
                Some(m) => parse_month(&m)?,
                None => {
                    use chrono::Datelike;
                    let today = chrono::Local::now().date_naive();
                    (today.year(), today.month())
                }
            };

            let report = MonthlyReport::generate(storage, year, month)?;

            match output {
                Some(path) => {
                    let file = File::create(&path).map_err(|e| {
                        CaixaError::Export(format!("Failed to create {}: {}", path.display(), e))
                    })?;
                    report.export_csv(BufWriter::new(file))?;
                    println!("Report for {} written to {}", report.period(), path.display());
                }
                None => {
                    print!(
                        "{}",
                        format_monthly_report(&report, DisplayStyle::from_settings(settings))
                    );
                }
            }
        }
    }

    Ok(())
}
