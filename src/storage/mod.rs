//! Storage layer for caixa
//!
//! Stands in for the hosted data store: one JSON file per entity kind with
//! atomic writes, plus the audit log. A single `Storage` is built by the
//! caller and handed by reference to every service and report.

pub mod file_io;
pub mod repository;

pub use file_io::{read_json, write_json_atomic};
pub use repository::{Record, Repository};

use crate::audit::{generate_diff, AuditEntry, AuditLogger};
use crate::config::paths::CaixaPaths;
use crate::error::CaixaError;
use crate::models::{Expense, Invoice, ServiceOrder};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: CaixaPaths,
    audit: AuditLogger,
    pub expenses: Repository<Expense>,
    pub invoices: Repository<Invoice>,
    pub service_orders: Repository<ServiceOrder>,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: CaixaPaths) -> Result<Self, CaixaError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            expenses: Repository::new(paths.expenses_file()),
            invoices: Repository::new(paths.invoices_file()),
            service_orders: Repository::new(paths.service_orders_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &CaixaPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), CaixaError> {
        self.expenses.load()?;
        self.invoices.load()?;
        self.service_orders.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), CaixaError> {
        self.expenses.save()?;
        self.invoices.save()?;
        self.service_orders.save()?;
        Ok(())
    }

    /// Record a created entity in the audit log
    pub fn log_create<T: Record>(&self, record: &T) -> Result<(), CaixaError> {
        self.audit.log(&AuditEntry::create(
            T::ENTITY_TYPE,
            record.id().to_string(),
            Some(record.label()),
            record,
        ))
    }

    /// Record an updated entity, with a field diff, in the audit log
    pub fn log_update<T: Record>(&self, before: &T, after: &T) -> Result<(), CaixaError> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };

        self.audit.log(&AuditEntry::update(
            T::ENTITY_TYPE,
            after.id().to_string(),
            Some(after.label()),
            before,
            after,
            diff,
        ))
    }

    /// Record a deleted entity in the audit log
    pub fn log_delete<T: Record>(&self, record: &T) -> Result<(), CaixaError> {
        self.audit.log(&AuditEntry::delete(
            T::ENTITY_TYPE,
            record.id().to_string(),
            Some(record.label()),
            record,
        ))
    }
}
