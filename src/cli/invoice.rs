//! Invoice CLI commands

use clap::Subcommand;

use super::{parse_date, parse_date_or_today};
use crate::config::Settings;
use crate::display::{format_invoice_details, format_invoice_list, DisplayStyle};
use crate::error::{CaixaError, CaixaResult};
use crate::models::{InvoiceStatus, NewInvoice, NewInvoiceLine};
use crate::services::InvoiceService;
use crate::storage::Storage;

/// Invoice subcommands
#[derive(Subcommand)]
pub enum InvoiceCommands {
    /// Register a supplier invoice
    Add {
        supplier: String,
        /// Line item as "description=amount"; repeat for several lines
        #[arg(short, long = "line", required = true)]
        lines: Vec<String>,
        /// Supplier document number
        #[arg(long, default_value = "")]
        document: String,
        /// Issue date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        issued: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
    },
    /// Register a payment against an invoice
    Pay {
        /// Invoice ID or document number
        id: String,
        amount: String,
        /// Payment date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long, default_value = "")]
        memo: String,
    },
    /// List invoices
    List {
        /// Filter by status (open, partial, paid, overdue)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show invoice details
    Show { id: String },
    /// Delete an invoice
    Delete { id: String },
}

/// Split a "description=amount" argument at its last '='
fn parse_line(raw: &str) -> CaixaResult<NewInvoiceLine> {
    let (description, amount) = raw.rsplit_once('=').ok_or_else(|| {
        CaixaError::Validation(format!(
            "Invalid line '{}'. Use \"description=amount\"",
            raw
        ))
    })?;

    Ok(NewInvoiceLine {
        description: description.trim().to_string(),
        amount: amount.trim().to_string(),
    })
}

/// Handle an invoice command
pub fn handle_invoice_command(
    storage: &Storage,
    settings: &Settings,
    cmd: InvoiceCommands,
) -> CaixaResult<()> {
    let service = InvoiceService::new(storage);
    let style = DisplayStyle::from_settings(settings);
    let today = chrono::Local::now().date_naive();

    match cmd {
        InvoiceCommands::Add {
            supplier,
            lines,
            document,
            issued,
            due,
        } => {
            let lines = lines
                .iter()
                .map(|l| parse_line(l))
                .collect::<CaixaResult<Vec<_>>>()?;

            let invoice = service.create(NewInvoice {
                supplier,
                document,
                issue_date: parse_date_or_today(issued.as_deref())?,
                due_date: parse_date(&due)?,
                lines,
            })?;
            println!(
                "Registered invoice {}: {} ({})",
                invoice.id,
                invoice.label(),
                style.money(invoice.total())
            );
        }
        InvoiceCommands::Pay {
            id,
            amount,
            date,
            memo,
        } => {
            let date = parse_date_or_today(date.as_deref())?;
            let invoice = service.register_payment(&id, &amount, date, memo)?;
            println!(
                "Payment registered on {}. Outstanding: {} ({})",
                invoice.label(),
                style.money(invoice.outstanding()),
                invoice.status(today)
            );
        }
        InvoiceCommands::List { status } => {
            let status = status
                .map(|s| {
                    InvoiceStatus::parse(&s).ok_or_else(|| {
                        CaixaError::Validation(format!(
                            "Unknown status '{}'. Use open, partial, paid or overdue",
                            s
                        ))
                    })
                })
                .transpose()?;
            let invoices = service.list(status, today)?;
            println!("{}", format_invoice_list(&invoices, style, today));
        }
        InvoiceCommands::Show { id } => {
            let invoice = service
                .find(&id)?
                .ok_or_else(|| CaixaError::invoice_not_found(&id))?;
            print!("{}", format_invoice_details(&invoice, style, today));
        }
        InvoiceCommands::Delete { id } => {
            let invoice = service.delete(&id)?;
            println!("Deleted invoice {}: {}", invoice.id, invoice.label());
        }
    }

    Ok(())
}
