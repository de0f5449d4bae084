//! Generic JSON-file repository
//!
//! Each entity kind lives in its own JSON file holding an array of records.
//! The file is loaded into an in-memory map keyed by the typed id and written
//! back atomically on `save`.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::audit::EntityType;
use crate::error::CaixaError;
use crate::models::{Expense, ExpenseId, Invoice, InvoiceId, ServiceOrder, ServiceOrderId};

use super::file_io::{read_json, write_json_atomic};

/// A persisted entity
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + Display;

    /// Audit category of this record
    const ENTITY_TYPE: EntityType;

    fn id(&self) -> Self::Id;

    /// Whether a user-supplied identifier names this record
    fn matches(&self, identifier: &str) -> bool;

    /// Business date used for ordering (newest first)
    fn date(&self) -> NaiveDate;

    fn created_at(&self) -> DateTime<Utc>;

    /// Short label for audit entries and messages
    fn label(&self) -> String;
}

impl Record for Expense {
    type Id = ExpenseId;
    const ENTITY_TYPE: EntityType = EntityType::Expense;

    fn id(&self) -> ExpenseId {
        self.id
    }

    fn matches(&self, identifier: &str) -> bool {
        self.id.matches(identifier)
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn label(&self) -> String {
        self.description.clone()
    }
}

impl Record for Invoice {
    type Id = InvoiceId;
    const ENTITY_TYPE: EntityType = EntityType::Invoice;

    fn id(&self) -> InvoiceId {
        self.id
    }

    fn matches(&self, identifier: &str) -> bool {
        self.id.matches(identifier)
            || (!self.document.is_empty() && self.document.eq_ignore_ascii_case(identifier.trim()))
    }

    fn date(&self) -> NaiveDate {
        self.due_date
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn label(&self) -> String {
        Invoice::label(self)
    }
}

impl Record for ServiceOrder {
    type Id = ServiceOrderId;
    const ENTITY_TYPE: EntityType = EntityType::ServiceOrder;

    fn id(&self) -> ServiceOrderId {
        self.id
    }

    fn matches(&self, identifier: &str) -> bool {
        self.id.matches(identifier) || self.number.eq_ignore_ascii_case(identifier.trim())
    }

    fn date(&self) -> NaiveDate {
        self.opened_on
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn label(&self) -> String {
        format!("{} {}", self.number, self.client)
    }
}

/// Repository for one record type, backed by one JSON file
pub struct Repository<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

fn lock_error(e: impl Display) -> CaixaError {
    CaixaError::Storage(format!("Failed to acquire lock: {}", e))
}

impl<T: Record> Repository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load records from disk, replacing anything in memory
    pub fn load(&self) -> Result<(), CaixaError> {
        let records: Vec<T> = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        data.extend(records.into_iter().map(|r| (r.id(), r)));

        tracing::debug!(
            entity = %T::ENTITY_TYPE,
            count = data.len(),
            path = %self.path.display(),
            "records loaded"
        );
        Ok(())
    }

    /// Write all records to disk, newest first
    pub fn save(&self) -> Result<(), CaixaError> {
        let records = self.get_all()?;
        write_json_atomic(&self.path, &records)
    }

    pub fn get(&self, id: T::Id) -> Result<Option<T>, CaixaError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Find a record by full id, short id or business key
    ///
    /// An identifier matching more than one record is a validation error.
    pub fn find(&self, identifier: &str) -> Result<Option<T>, CaixaError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut matches = data.values().filter(|r| r.matches(identifier));

        let first = match matches.next() {
            Some(record) => record,
            None => return Ok(None),
        };

        let others = matches.count();
        if others > 0 {
            return Err(CaixaError::Validation(format!(
                "Identifier '{}' matches {} {} records; use the full ID",
                identifier,
                others + 1,
                T::ENTITY_TYPE
            )));
        }

        Ok(Some(first.clone()))
    }

    /// All records, newest business date first
    pub fn get_all(&self) -> Result<Vec<T>, CaixaError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut records: Vec<_> = data.values().cloned().collect();
        records.sort_by(|a, b| {
            b.date()
                .cmp(&a.date())
                .then(b.created_at().cmp(&a.created_at()))
        });
        Ok(records)
    }

    /// Insert or replace a record
    pub fn upsert(&self, record: T) -> Result<(), CaixaError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(record.id(), record);
        Ok(())
    }

    /// Remove a record, returning it if it existed
    pub fn delete(&self, id: T::Id) -> Result<Option<T>, CaixaError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id))
    }

    pub fn count(&self) -> Result<usize, CaixaError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Amount;
    use tempfile::TempDir;

    fn expense(desc: &str, day: u32) -> Expense {
        Expense::new(
            desc,
            "Escritório",
            Amount::from_cents(1000),
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        )
    }

    #[test]
    fn test_upsert_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");

        let repo: Repository<Expense> = Repository::new(path.clone());
        let e = expense("Toner", 3);
        repo.upsert(e.clone()).unwrap();
        repo.save().unwrap();

        let reopened: Repository<Expense> = Repository::new(path);
        reopened.load().unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
        assert_eq!(reopened.get(e.id).unwrap(), Some(e));
    }

    #[test]
    fn test_get_all_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let repo: Repository<Expense> = Repository::new(temp_dir.path().join("e.json"));
        repo.upsert(expense("old", 1)).unwrap();
        repo.upsert(expense("new", 20)).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].description, "new");
        assert_eq!(all[1].description, "old");
    }

    #[test]
    fn test_find_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo: Repository<Expense> = Repository::new(temp_dir.path().join("e.json"));
        let e = expense("Toner", 3);
        repo.upsert(e.clone()).unwrap();

        assert!(repo.find(&e.id.to_string()).unwrap().is_some());
        assert!(repo.find("exp-00000000").unwrap().is_none());

        assert!(repo.delete(e.id).unwrap().is_some());
        assert!(repo.delete(e.id).unwrap().is_none());
    }

    #[test]
    fn test_service_order_found_by_number() {
        let temp_dir = TempDir::new().unwrap();
        let repo: Repository<ServiceOrder> = Repository::new(temp_dir.path().join("os.json"));
        let order = ServiceOrder::new(
            "OS-7",
            "Cliente",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            1.0,
        );
        repo.upsert(order.clone()).unwrap();

        assert_eq!(repo.find("os-7").unwrap().map(|o| o.id), Some(order.id));
    }

    #[test]
    fn test_shared_document_is_ambiguous() {
        let temp_dir = TempDir::new().unwrap();
        let repo: Repository<Invoice> = Repository::new(temp_dir.path().join("inv.json"));
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let first = Invoice::new("ACME", "NF 5", day, day, Vec::new());
        let second = Invoice::new("Outra", "nf 5", day, day, Vec::new());
        repo.upsert(first.clone()).unwrap();
        repo.upsert(second).unwrap();

        let err = repo.find("NF 5").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("matches 2"));

        assert_eq!(
            repo.find(&first.id.to_string()).unwrap().map(|i| i.id),
            Some(first.id)
        );
    }
}
