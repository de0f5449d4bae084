//! Expense display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{truncate, DisplayStyle};
use crate::models::Expense;
use crate::money::Amount;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Paid")]
    paid: &'static str,
}

/// Format a list of expenses as a table with a total line
pub fn format_expense_list(expenses: &[Expense], style: DisplayStyle) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: style.date(e.date),
        description: truncate(&e.description, 40),
        category: e.category.clone(),
        amount: style.money(e.amount),
        paid: if e.paid { "yes" } else { "no" },
    });

    let total: Amount = expenses.iter().map(|e| e.amount).sum();
    let mut table = Table::new(rows);
    table.with(Style::psql());

    format!(
        "{}\n\n{} expense(s), total {}",
        table,
        expenses.len(),
        style.money(total)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_list() {
        let settings = Settings::default();
        let out = format_expense_list(&[], DisplayStyle::from_settings(&settings));
        assert_eq!(out, "No expenses found.");
    }

    #[test]
    fn test_list_with_total() {
        let settings = Settings::default();
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let expenses = vec![
            Expense::new("Luz", "Utilidades", Amount::parse("0,10"), date),
            Expense::new("Água", "Utilidades", Amount::parse("0,20"), date),
        ];

        let out = format_expense_list(&expenses, DisplayStyle::from_settings(&settings));
        assert!(out.contains("Description"));
        assert!(out.contains("R$ 0.10"));
        assert!(out.contains("01/03/2025"));
        assert!(out.ends_with("2 expense(s), total R$ 0.30"));
    }
}
