//! Domain error types
//!
//! This module defines the error hierarchy for the report pipeline.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main report error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The operational database could not be reached or the query failed
    ///
    /// The data source adapter recovers from this locally by returning an
    /// empty row set; it only surfaces from the raw client calls.
    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    /// A report was requested for a format nobody knows how to build
    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),

    /// A fetched row is missing a required column or breaks a record invariant
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    /// Spreadsheet serialization errors
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Zip packaging errors
    #[error("Packaging error: {0}")]
    Packaging(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl ReportError {
    /// Creates a malformed-row error for the given zero-based row index
    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        ReportError::MalformedRow {
            row,
            reason: reason.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ReportError::Spreadsheet(err.to_string())
    }
}

impl From<zip::result::ZipError> for ReportError {
    fn from(err: zip::result::ZipError) -> Self {
        ReportError::Packaging(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_error_display() {
        let err = ReportError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_unsupported_format_display() {
        let err = ReportError::UnsupportedFormat("nielsen".to_string());
        assert_eq!(err.to_string(), "Unsupported report format: nielsen");
    }

    #[test]
    fn test_malformed_row_display() {
        let err = ReportError::malformed(3, "missing COD_PROD");
        assert_eq!(err.to_string(), "Malformed row 3: missing COD_PROD");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let report_err: ReportError = io_err.into();
        assert!(matches!(report_err, ReportError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let report_err: ReportError = json_err.into();
        assert!(matches!(report_err, ReportError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let report_err: ReportError = toml_err.into();
        assert!(matches!(report_err, ReportError::Configuration(_)));
        assert!(report_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_report_error_implements_std_error() {
        let err = ReportError::Packaging("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
