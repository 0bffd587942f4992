//! Logging
//!
//! [`init_logging`] installs the subscriber; the macros below keep the
//! field names of recurring report events consistent.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a report generation
///
/// # Example
///
/// ```no_run
/// use farmu_reports::log_report_start;
/// use farmu_reports::core::export::ReportPeriod;
///
/// let period = ReportPeriod::new(2024, 5).unwrap();
/// log_report_start!(&period, "files");
/// ```
#[macro_export]
macro_rules! log_report_start {
    ($period:expr, $delivery:expr) => {
        tracing::info!(
            period = %$period,
            delivery = $delivery,
            "Starting report generation"
        );
    };
}

/// Log the completion of a report generation
///
/// # Example
///
/// ```no_run
/// use farmu_reports::log_report_complete;
/// use std::time::Duration;
///
/// log_report_complete!(42, 2, Duration::from_millis(850));
/// ```
#[macro_export]
macro_rules! log_report_complete {
    ($rows:expr, $files:expr, $duration:expr) => {
        tracing::info!(
            rows = $rows,
            files = $files,
            duration_ms = $duration.as_millis() as u64,
            "Report generation completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use farmu_reports::log_error_with_context;
/// use farmu_reports::domain::ReportError;
///
/// let error = ReportError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
