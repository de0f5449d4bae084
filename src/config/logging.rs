//! Logging initialization
//!
//! Diagnostics go to stderr through `tracing`, so command output on stdout
//! stays clean for scripts.

use tracing_subscriber::{fmt, EnvFilter};

use super::settings::LoggingSettings;

impl LoggingSettings {
    /// Build the filter: `RUST_LOG` wins, then the configured level
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }

    /// Initialize the global tracing subscriber
    ///
    /// Safe to call more than once; later calls are ignored.
    pub fn init(&self) {
        let filter = self.env_filter();

        let result = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };

        if result.is_err() {
            tracing::debug!("tracing subscriber already installed");
        }
    }
}
