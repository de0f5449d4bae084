//! Expense CLI commands

use clap::Subcommand;

use super::{parse_date, parse_date_or_today};
use crate::config::Settings;
use crate::display::{format_expense_list, DisplayStyle};
use crate::error::CaixaResult;
use crate::models::{ExpenseUpdate, NewExpense};
use crate::services::{parse_month, ExpenseFilter, ExpenseService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        description: String,
        /// Amount, e.g. "1250,00" or "1250.00"
        amount: String,
        #[arg(short, long)]
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Record as already paid
        #[arg(long)]
        paid: bool,
    },
    /// List expenses
    List {
        /// Month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// Only paid expenses
        #[arg(long, conflicts_with = "unpaid")]
        paid: bool,
        /// Only unpaid expenses
        #[arg(long)]
        unpaid: bool,
    },
    /// Change one field of an expense
    Edit {
        /// Expense ID
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Mark an expense as paid
    Pay {
        id: String,
        /// Mark as unpaid instead
        #[arg(long)]
        undo: bool,
    },
    /// Delete an expense
    Delete { id: String },
    /// Total of the matching expenses
    Total {
        #[arg(short, long)]
        month: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },
}

fn build_filter(
    month: Option<String>,
    category: Option<String>,
    paid: Option<bool>,
) -> CaixaResult<ExpenseFilter> {
    let mut filter = ExpenseFilter::new();
    if let Some(month) = month {
        let (year, month) = parse_month(&month)?;
        filter = filter.month(year, month);
    }
    if let Some(category) = category {
        filter = filter.category(category);
    }
    filter.paid = paid;
    Ok(filter)
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> CaixaResult<()> {
    let service = ExpenseService::new(storage);
    let style = DisplayStyle::from_settings(settings);

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            date,
            paid,
        } => {
            let expense = service.create(NewExpense {
                description,
                category,
                amount,
                date: parse_date_or_today(date.as_deref())?,
                paid,
            })?;
            println!(
                "Recorded expense {}: {} ({})",
                expense.id,
                expense.description,
                style.money(expense.amount)
            );
        }
        ExpenseCommands::List {
            month,
            category,
            paid,
            unpaid,
        } => {
            let paid = match (paid, unpaid) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let expenses = service.list(&build_filter(month, category, paid)?)?;
            println!("{}", format_expense_list(&expenses, style));
        }
        ExpenseCommands::Edit {
            id,
            description,
            category,
            amount,
            date,
        } => {
            let mut changes = Vec::new();
            if let Some(description) = description {
                changes.push(ExpenseUpdate::Description(description));
            }
            if let Some(category) = category {
                changes.push(ExpenseUpdate::Category(category));
            }
            if let Some(amount) = amount {
                changes.push(ExpenseUpdate::Amount(amount));
            }
            if let Some(date) = date {
                changes.push(ExpenseUpdate::Date(parse_date(&date)?));
            }

            if changes.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }

            let mut updated = None;
            for change in changes {
                updated = Some(service.update(&id, change)?);
            }
            if let Some(expense) = updated {
                println!("Updated expense {}: {}", expense.id, expense);
            }
        }
        ExpenseCommands::Pay { id, undo } => {
            let change = if undo {
                ExpenseUpdate::MarkUnpaid
            } else {
                ExpenseUpdate::MarkPaid
            };
            let expense = service.update(&id, change)?;
            println!(
                "Expense {} marked {}",
                expense.id,
                if expense.paid { "paid" } else { "unpaid" }
            );
        }
        ExpenseCommands::Delete { id } => {
            let expense = service.delete(&id)?;
            println!("Deleted expense {}: {}", expense.id, expense.description);
        }
        ExpenseCommands::Total { month, category } => {
            let total = service.total(&build_filter(month, category, None)?)?;
            println!("{}", total);
        }
    }

    Ok(())
}
