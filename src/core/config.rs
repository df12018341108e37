//! Registry configuration
//!
//! Holds the file locations the store and the report writer use. Built from
//! CLI arguments by [`crate::cli::CliArgs::to_config`], or from defaults.

use std::path::PathBuf;

/// Default location of the store's flat file
pub const DEFAULT_STORE_PATH: &str = "data/customers.csv";

/// Default location of the statistics report
pub const DEFAULT_REPORT_PATH: &str = "reports/summary.txt";

/// File locations used by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Flat file the store exports to and loads from; backups are created
    /// alongside it
    pub store_path: PathBuf,

    /// Destination of the plain-text statistics report
    pub report_path: PathBuf,
}

impl RegistryConfig {
    pub fn new(store_path: impl Into<PathBuf>, report_path: impl Into<PathBuf>) -> Self {
        RegistryConfig {
            store_path: store_path.into(),
            report_path: report_path.into(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_PATH, DEFAULT_REPORT_PATH)
    }
}
