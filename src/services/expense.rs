//! Expense service
//!
//! Business logic for expenses: creation and edits from raw user input,
//! filtered listings and totals.

use chrono::NaiveDate;

use crate::error::{CaixaError, CaixaResult};
use crate::models::{Expense, ExpenseUpdate, NewExpense};
use crate::money::{validate_monetary_value, Amount};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Calendar month as (year, month)
    pub month: Option<(i32, u32)>,
    /// Category, compared case-insensitively
    pub category: Option<String>,
    /// Paid state
    pub paid: Option<bool>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(mut self, year: i32, month: u32) -> Self {
        self.month = Some((year, month));
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn paid(mut self, paid: bool) -> Self {
        self.paid = Some(paid);
        self
    }

    fn accepts(&self, expense: &Expense) -> bool {
        if let Some((year, month)) = self.month {
            if !expense.is_in_month(year, month) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !expense.category.trim().eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }
        self.paid.map_or(true, |paid| expense.paid == paid)
    }
}

/// Checks raw amount text and converts it to an `Amount`
pub(crate) fn checked_amount(field: &str, raw: &str) -> CaixaResult<Amount> {
    if !validate_monetary_value(raw) {
        return Err(CaixaError::invalid_amount(field, raw));
    }
    Ok(Amount::parse(raw))
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create an expense from a typed payload
    pub fn create(&self, input: NewExpense) -> CaixaResult<Expense> {
        let amount = checked_amount("amount", &input.amount)?;

        let mut expense = Expense::new(
            input.description.trim(),
            input.category.trim(),
            amount,
            input.date,
        );
        expense.paid = input.paid;

        expense
            .validate()
            .map_err(|e| CaixaError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;
        self.storage.log_create(&expense)?;

        tracing::info!(id = %expense.id, amount = %expense.amount, "expense created");
        Ok(expense)
    }

    /// Find an expense by ID string
    pub fn find(&self, identifier: &str) -> CaixaResult<Option<Expense>> {
        self.storage.expenses.find(identifier)
    }

    fn require(&self, identifier: &str) -> CaixaResult<Expense> {
        self.find(identifier)?
            .ok_or_else(|| CaixaError::expense_not_found(identifier))
    }

    /// List expenses matching a filter, newest first
    pub fn list(&self, filter: &ExpenseFilter) -> CaixaResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses.get_all()?;
        expenses.retain(|e| filter.accepts(e));
        Ok(expenses)
    }

    /// Sum of the amounts of the expenses matching a filter
    pub fn total(&self, filter: &ExpenseFilter) -> CaixaResult<Amount> {
        Ok(self.list(filter)?.iter().map(|e| e.amount).sum())
    }

    /// Apply a single change to an expense
    pub fn update(&self, identifier: &str, change: ExpenseUpdate) -> CaixaResult<Expense> {
        let mut expense = self.require(identifier)?;
        let before = expense.clone();

        match change {
            ExpenseUpdate::Description(description) => {
                expense.description = description.trim().to_string()
            }
            ExpenseUpdate::Category(category) => expense.category = category.trim().to_string(),
            ExpenseUpdate::Amount(raw) => expense.amount = checked_amount("amount", &raw)?,
            ExpenseUpdate::Date(date) => expense.date = date,
            ExpenseUpdate::MarkPaid => expense.paid = true,
            ExpenseUpdate::MarkUnpaid => expense.paid = false,
        }

        if expense == before {
            return Ok(expense);
        }

        expense.touch();
        expense
            .validate()
            .map_err(|e| CaixaError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;
        self.storage.log_update(&before, &expense)?;

        tracing::info!(id = %expense.id, "expense updated");
        Ok(expense)
    }

    /// Delete an expense
    pub fn delete(&self, identifier: &str) -> CaixaResult<Expense> {
        let expense = self.require(identifier)?;

        self.storage.expenses.delete(expense.id)?;
        self.storage.expenses.save()?;
        self.storage.log_delete(&expense)?;

        tracing::info!(id = %expense.id, "expense deleted");
        Ok(expense)
    }

    /// Expenses dated within a calendar month
    pub fn for_month(&self, year: i32, month: u32) -> CaixaResult<Vec<Expense>> {
        self.list(&ExpenseFilter::new().month(year, month))
    }
}

/// Parse a `YYYY-MM` month argument
pub fn parse_month(s: &str) -> CaixaResult<(i32, u32)> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map(|d| {
            use chrono::Datelike;
            (d.year(), d.month())
        })
        .map_err(|_| CaixaError::Validation(format!("Invalid month '{}': use YYYY-MM", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CaixaPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CaixaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn new_expense(description: &str, category: &str, amount: &str, day: u32) -> NewExpense {
        NewExpense {
            description: description.into(),
            category: category.into(),
            amount: amount.into(),
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            paid: false,
        }
    }

    #[test]
    fn test_create_expense() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service
            .create(new_expense(" Aluguel ", "Imóvel", "1250,00", 5))
            .unwrap();
        assert_eq!(expense.description, "Aluguel");
        assert_eq!(expense.amount.cents(), 125000);
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_invalid_amount() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        for raw in ["50.123", "", "12,5x", "-10"] {
            let err = service.create(new_expense("x", "y", raw, 1)).unwrap_err();
            assert!(err.is_validation(), "{raw:?} should be rejected");
        }

        let err = service.create(new_expense("x", "y", "0", 1)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_total_is_exact() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        for (amount, day) in [("10.10", 1), ("20.20", 2), ("30.30", 3)] {
            service.create(new_expense("item", "Escritório", amount, day)).unwrap();
        }
        let total = service.total(&ExpenseFilter::new()).unwrap();
        assert_eq!(total.to_string(), "60.60");
    }

    #[test]
    fn test_filters() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let a = service.create(new_expense("Papel", "Escritório", "30", 1)).unwrap();
        service.create(new_expense("Gasolina", "Combustível", "200", 2)).unwrap();
        service.update(&a.id.to_string(), ExpenseUpdate::MarkPaid).unwrap();

        let office = service.list(&ExpenseFilter::new().category("escritório")).unwrap();
        assert_eq!(office.len(), 1);

        let unpaid = service.list(&ExpenseFilter::new().paid(false)).unwrap();
        assert_eq!(unpaid.len(), 1);
        assert_eq!(unpaid[0].description, "Gasolina");

        assert!(service.list(&ExpenseFilter::new().month(2025, 4)).unwrap().is_empty());
        assert_eq!(service.for_month(2025, 3).unwrap().len(), 2);
    }

    #[test]
    fn test_update_amount_and_audit_diff() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service.create(new_expense("Luz", "Utilidades", "100", 1)).unwrap();
        let updated = service
            .update(&expense.id.to_string(), ExpenseUpdate::Amount("123,45".into()))
            .unwrap();
        assert_eq!(updated.amount.cents(), 12345);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(
            entries[1].diff_summary.as_deref(),
            Some("amount: 100.0 -> 123.45")
        );

        let err = service
            .update(&expense.id.to_string(), ExpenseUpdate::Amount("1.234".into()))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_noop_update_is_not_audited() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service.create(new_expense("Luz", "Utilidades", "100", 1)).unwrap();
        service.update(&expense.id.to_string(), ExpenseUpdate::MarkUnpaid).unwrap();
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service.create(new_expense("Luz", "Utilidades", "100", 1)).unwrap();
        service.delete(&expense.id.to_string()).unwrap();
        assert!(service.find(&expense.id.to_string()).unwrap().is_none());
        assert!(service.delete(&expense.id.to_string()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-03").unwrap(), (2025, 3));
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("março").is_err());
    }
}
