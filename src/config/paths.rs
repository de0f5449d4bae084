//! Path management for caixa
//!
//! ## Path Resolution Order
//!
//! 1. `CAIXA_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/caixa` on Linux, `~/Library/Application Support/caixa` on
//!    macOS, `%APPDATA%\caixa` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::CaixaError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "CAIXA_DATA_DIR";

/// Manages all paths used by caixa
#[derive(Debug, Clone)]
pub struct CaixaPaths {
    /// Base directory for all caixa data
    base_dir: PathBuf,
}

impl CaixaPaths {
    /// Create a new CaixaPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, CaixaError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create CaixaPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Get the path to invoices.json
    pub fn invoices_file(&self) -> PathBuf {
        self.data_dir().join("invoices.json")
    }

    /// Get the path to service_orders.json
    pub fn service_orders_file(&self) -> PathBuf {
        self.data_dir().join("service_orders.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), CaixaError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CaixaError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| CaixaError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if caixa has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, CaixaError> {
    ProjectDirs::from("", "", "caixa")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| CaixaError::Config("Could not determine a home directory".into()))
}
