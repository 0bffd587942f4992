//! Configuration schema types
//!
//! This module defines the configuration structure for the report service.

use crate::config::{secret_string, SecretString};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Main configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section has defaults, so a configuration can be supplied entirely
/// through environment overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Order database connection
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Report output settings
    #[serde(default)]
    pub report: ReportConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReportsConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.database.validate()?;
        self.report.validate()?;
        self.server.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Order database server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    /// The operational store
    #[default]
    Mysql,
    Postgresql,
}

impl DatabaseEngine {
    /// Port used when `database.port` is not set
    pub fn default_port(self) -> u16 {
        match self {
            DatabaseEngine::Mysql => 3306,
            DatabaseEngine::Postgresql => 5432,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DatabaseEngine::Mysql => "mysql",
            DatabaseEngine::Postgresql => "postgresql",
        }
    }
}

impl fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(DatabaseEngine::Mysql),
            "postgresql" | "postgres" => Ok(DatabaseEngine::Postgresql),
            other => Err(format!(
                "database.engine must be one of: mysql, postgresql, got '{other}'"
            )),
        }
    }
}

/// Order database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Server type, `mysql` unless set
    #[serde(default)]
    pub engine: DatabaseEngine,

    #[serde(default = "default_db_host")]
    pub host: String,

    /// Defaults to the engine's standard port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default)]
    pub user: String,

    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default = "default_db_password")]
    pub password: SecretString,

    /// Database name
    #[serde(default)]
    pub name: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_db_max_connections")]
    pub max_connections: usize,

    /// Pool wait and connect timeout in seconds
    #[serde(default = "default_db_connection_timeout_seconds")]
    pub connection_timeout_seconds: u64,

    /// Statement timeout in seconds
    #[serde(default = "default_db_statement_timeout_seconds")]
    pub statement_timeout_seconds: u64,

    /// TLS mode: `disable` or `require`
    #[serde(default = "default_db_ssl_mode")]
    pub ssl_mode: String,
}

impl DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("database.host cannot be empty".to_string());
        }
        if self.port == Some(0) {
            return Err("database.port must be > 0".to_string());
        }
        if self.user.trim().is_empty() {
            return Err("database.user cannot be empty".to_string());
        }
        if self.password.expose_secret().is_empty() {
            return Err("database.password cannot be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("database.name cannot be empty".to_string());
        }

        if self.max_connections == 0 || self.max_connections > 100 {
            return Err(format!(
                "database.max_connections must be between 1 and 100, got {}",
                self.max_connections
            ));
        }
        if self.connection_timeout_seconds == 0 {
            return Err("database.connection_timeout_seconds must be > 0".to_string());
        }
        if self.statement_timeout_seconds == 0 {
            return Err("database.statement_timeout_seconds must be > 0".to_string());
        }

        let valid_ssl_modes = ["disable", "require"];
        if !valid_ssl_modes.contains(&self.ssl_mode.as_str()) {
            return Err(format!(
                "database.ssl_mode must be one of: {}, got '{}'",
                valid_ssl_modes.join(", "),
                self.ssl_mode
            ));
        }

        Ok(())
    }

    /// Port to connect to
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.engine.default_port())
    }

    /// Connection target without credentials, for logs and status output
    pub fn connection_string_safe(&self) -> String {
        format!(
            "{}://{}:***@{}:{}/{}",
            self.engine,
            self.user,
            self.host,
            self.effective_port(),
            self.name
        )
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            engine: DatabaseEngine::default(),
            host: default_db_host(),
            port: None,
            user: String::new(),
            password: default_db_password(),
            name: String::new(),
            max_connections: default_db_max_connections(),
            connection_timeout_seconds: default_db_connection_timeout_seconds(),
            statement_timeout_seconds: default_db_statement_timeout_seconds(),
            ssl_mode: default_db_ssl_mode(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory the CLI writes workbooks into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Leading part of every workbook file name
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Download name of the zip archive
    #[serde(default = "default_archive_name")]
    pub archive_name: String,
}

impl ReportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("report.output_dir cannot be empty".to_string());
        }
        if self.file_prefix.trim().is_empty() {
            return Err("report.file_prefix cannot be empty".to_string());
        }
        if self.file_prefix.contains(['/', '\\']) {
            return Err(format!(
                "report.file_prefix cannot contain path separators, got '{}'",
                self.file_prefix
            ));
        }
        if !self.archive_name.ends_with(".zip") {
            return Err(format!(
                "report.archive_name must end with .zip, got '{}'",
                self.archive_name
            ));
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            archive_name: default_archive_name(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Accounts allowed to download reports
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bind_address.trim().is_empty() {
            return Err("server.bind_address cannot be empty".to_string());
        }

        let mut seen = HashSet::new();
        for user in &self.users {
            if user.username.trim().is_empty() {
                return Err("server.users entries need a username".to_string());
            }
            if user.username.contains(':') {
                return Err(format!(
                    "server.users username '{}' cannot contain ':'",
                    user.username
                ));
            }
            if user.password.expose_secret().is_empty() {
                return Err(format!(
                    "server.users password for '{}' cannot be empty",
                    user.username
                ));
            }
            if !seen.insert(user.username.as_str()) {
                return Err(format!("server.users has duplicate username '{}'", user.username));
            }
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_server_port(),
            users: Vec::new(),
        }
    }
}

/// One HTTP Basic account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub username: String,

    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,
}

impl UserConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: secret_string(password.into()),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    /// Console-only logging
    pub fn console_only() -> Self {
        Self {
            local_enabled: false,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_password() -> SecretString {
    secret_string(String::new())
}

fn default_db_max_connections() -> usize {
    4
}

fn default_db_connection_timeout_seconds() -> u64 {
    30
}

fn default_db_statement_timeout_seconds() -> u64 {
    120
}

fn default_db_ssl_mode() -> String {
    "disable".to_string()
}

fn default_output_dir() -> String {
    "reports".to_string()
}

fn default_file_prefix() -> String {
    "Data Farmu".to_string()
}

fn default_archive_name() -> String {
    "Reportes_Farmu.zip".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    5000
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
