//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DatabaseEngine, ReportsConfig};
use super::secret_string;
use crate::domain::errors::ReportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ReportsConfig
/// 4. Applies environment variable overrides (engine, legacy MYSQL_*, then FARMU_*)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ReportError::Configuration`] if the file cannot be read, a
/// referenced variable is unset, the TOML is invalid or validation fails.
///
/// # Examples
///
/// ```no_run
/// use farmu_reports::config::loader::load_config;
///
/// let config = load_config("farmu-reports.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ReportsConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ReportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ReportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Same as [`load_config`] for configuration text already in memory
pub fn load_config_from_str(contents: &str) -> Result<ReportsConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ReportsConfig = toml::from_str(&contents)
        .map_err(|e| ReportError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ReportError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ReportError::Configuration(format!("Invalid placeholder pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(ReportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

const LEGACY_MYSQL_VARS: [&str; 5] = [
    "MYSQL_HOST",
    "MYSQL_PORT",
    "MYSQL_USER",
    "MYSQL_PASSWORD",
    "MYSQL_DB",
];

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn env_parsed<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ReportError::Configuration(format!("{name} has an invalid value: '{raw}'"))),
        None => Ok(None),
    }
}

/// Applies environment variable overrides
///
/// `FARMU_DATABASE_ENGINE` is read first. The legacy `MYSQL_HOST`,
/// `MYSQL_PORT`, `MYSQL_USER`, `MYSQL_PASSWORD` and `MYSQL_DB` names only
/// apply to the MySQL engine. `FARMU_<SECTION>_<KEY>` comes last, so the
/// prefixed form wins when both are set.
///
/// # Errors
///
/// Returns an error when a typed override cannot be parsed, or when
/// `MYSQL_*` variables are set while the engine is not MySQL.
fn apply_env_overrides(config: &mut ReportsConfig) -> Result<()> {
    if let Some(val) = env("FARMU_DATABASE_ENGINE") {
        config.database.engine = val.parse().map_err(ReportError::Configuration)?;
    }

    apply_legacy_mysql_overrides(config)?;

    // Application overrides
    if let Some(val) = env("FARMU_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Database overrides
    if let Some(val) = env("FARMU_DATABASE_HOST") {
        config.database.host = val;
    }
    if let Some(port) = env_parsed("FARMU_DATABASE_PORT")? {
        config.database.port = Some(port);
    }
    if let Some(val) = env("FARMU_DATABASE_USER") {
        config.database.user = val;
    }
    if let Some(val) = env("FARMU_DATABASE_PASSWORD") {
        config.database.password = secret_string(val);
    }
    if let Some(val) = env("FARMU_DATABASE_NAME") {
        config.database.name = val;
    }
    if let Some(max) = env_parsed("FARMU_DATABASE_MAX_CONNECTIONS")? {
        config.database.max_connections = max;
    }
    if let Some(secs) = env_parsed("FARMU_DATABASE_CONNECTION_TIMEOUT_SECONDS")? {
        config.database.connection_timeout_seconds = secs;
    }
    if let Some(secs) = env_parsed("FARMU_DATABASE_STATEMENT_TIMEOUT_SECONDS")? {
        config.database.statement_timeout_seconds = secs;
    }
    if let Some(val) = env("FARMU_DATABASE_SSL_MODE") {
        config.database.ssl_mode = val;
    }

    // Report overrides
    if let Some(val) = env("FARMU_REPORT_OUTPUT_DIR") {
        config.report.output_dir = val;
    }
    if let Some(val) = env("FARMU_REPORT_FILE_PREFIX") {
        config.report.file_prefix = val;
    }
    if let Some(val) = env("FARMU_REPORT_ARCHIVE_NAME") {
        config.report.archive_name = val;
    }

    // Server overrides
    if let Some(val) = env("FARMU_SERVER_BIND_ADDRESS") {
        config.server.bind_address = val;
    }
    if let Some(port) = env_parsed("FARMU_SERVER_PORT")? {
        config.server.port = port;
    }

    // Logging overrides
    if let Some(enabled) = env_parsed("FARMU_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = enabled;
    }
    if let Some(val) = env("FARMU_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env("FARMU_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

/// Legacy variables from the MySQL-only deployment
fn apply_legacy_mysql_overrides(config: &mut ReportsConfig) -> Result<()> {
    let set: Vec<&str> = LEGACY_MYSQL_VARS
        .iter()
        .copied()
        .filter(|name| env(name).is_some())
        .collect();
    if set.is_empty() {
        return Ok(());
    }

    if config.database.engine != DatabaseEngine::Mysql {
        return Err(ReportError::Configuration(format!(
            "{} only apply to database.engine = \"mysql\", but engine is '{}'",
            set.join(", "),
            config.database.engine
        )));
    }

    if let Some(val) = env("MYSQL_HOST") {
        config.database.host = val;
    }
    if let Some(port) = env_parsed("MYSQL_PORT")? {
        config.database.port = Some(port);
    }
    if let Some(val) = env("MYSQL_USER") {
        config.database.user = val;
    }
    if let Some(val) = env("MYSQL_PASSWORD") {
        config.database.password = secret_string(val);
    }
    if let Some(val) = env("MYSQL_DB") {
        config.database.name = val;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("FARMU_LOADER_TEST_VAR", "test_value");
        let input = "password = \"${FARMU_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"");
        std::env::remove_var("FARMU_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("FARMU_LOADER_MISSING_VAR");
        let input = "password = \"${FARMU_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("FARMU_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("FARMU_LOADER_COMMENTED_VAR");
        let input = "# password = \"${FARMU_LOADER_COMMENTED_VAR}\"\nport = 1";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(ReportError::Configuration(_))));
    }
}
