//! Subscriber setup
//!
//! Human-readable events go to stderr so command summaries on stdout stay
//! clean. When file logging is enabled, the same events are also written as
//! JSON lines to a rotating file under `local_path`.

use crate::config::LoggingConfig;
use crate::domain::{ReportError, Result};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const LOG_FILE_NAME: &str = "farmu-reports.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the background file writer alive; drop it last
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _writer: Option<WorkerGuard>,
}

/// Installs the global subscriber
///
/// `RUST_LOG` takes precedence over `level` when set. Otherwise both this
/// crate and `tower_http` (request spans from the server) log at `level`.
///
/// ```no_run
/// use farmu_reports::config::LoggingConfig;
/// use farmu_reports::logging::init_logging;
///
/// let _guard = init_logging("info", &LoggingConfig::console_only())?;
/// tracing::info!("ready");
/// # Ok::<(), farmu_reports::domain::ReportError>(())
/// ```
///
/// # Errors
///
/// Fails on an unknown level, an uncreatable log directory, or when a
/// global subscriber is already installed.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(level)?;

    let mut layers: Vec<BoxedLayer> = vec![console_layer(level)];
    let mut writer_guard = None;

    if config.local_enabled {
        let (writer, guard) = file_writer(Path::new(&config.local_path), &config.local_rotation)?;
        layers.push(json_layer(level, writer));
        writer_guard = Some(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| ReportError::Configuration(format!("Failed to install logger: {e}")))?;

    tracing::debug!(
        level = %level,
        file = config.local_enabled,
        path = %config.local_path,
        rotation = %config.local_rotation,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _writer: writer_guard,
    })
}

fn filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("farmu_reports={level},tower_http={level}")))
}

fn console_layer(level: Level) -> BoxedLayer {
    tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(filter(level))
        .boxed()
}

fn json_layer(level: Level, writer: NonBlocking) -> BoxedLayer {
    tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(writer)
        .with_filter(filter(level))
        .boxed()
}

fn file_writer(dir: &Path, rotation: &str) -> Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir).map_err(|e| {
        ReportError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            dir.display()
        ))
    })?;

    let appender = RollingFileAppender::new(parse_rotation(rotation), dir, LOG_FILE_NAME);
    Ok(tracing_appender::non_blocking(appender))
}

pub(crate) fn parse_log_level(level: &str) -> Result<Level> {
    level.trim().parse::<Level>().map_err(|_| {
        ReportError::Configuration(format!(
            "Invalid log level '{level}', expected trace, debug, info, warn or error"
        ))
    })
}

/// Config validation has already restricted the value to these three
fn parse_rotation(rotation: &str) -> Rotation {
    match rotation {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}
