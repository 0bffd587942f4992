//! Configuration management.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! The service reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `FARMU_<SECTION>_<KEY>` overrides, plus the legacy `MYSQL_*` names
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use farmu_reports::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("farmu-reports.toml")?;
//!
//! println!("Database: {}", config.database.connection_string_safe());
//! println!("Output: {}", config.report.output_dir);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`DatabaseConfig`] - Order database connection and pool
//! - [`ReportConfig`] - Output directory and file naming
//! - [`ServerConfig`] - HTTP listener and accounts
//! - [`LoggingConfig`] - File logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [database]
//! engine = "mysql"
//! host = "db.internal"
//! user = "reports"
//! password = "${FARMU_DB_PASSWORD}"
//! name = "farmu"
//!
//! [report]
//! output_dir = "reports"
//!
//! [[server.users]]
//! username = "iqvia"
//! password = "${FARMU_IQVIA_PASSWORD}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, DatabaseConfig, DatabaseEngine, LoggingConfig, ReportConfig, ReportsConfig,
    ServerConfig, UserConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
