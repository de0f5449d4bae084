//! Configuration module for caixa
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Logging setup

pub mod logging;
pub mod paths;
pub mod settings;

pub use paths::CaixaPaths;
pub use settings::{LoggingSettings, Settings};
