//! External system integrations.
//!
//! - [`database`] - Data source abstraction (trait-based) and in-memory source
//! - [`mysql`] - MySQL order source, the default engine
//! - [`postgresql`] - PostgreSQL order source
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory implementations.
//!
//! ```rust,no_run
//! use farmu_reports::adapters::database::create_order_source;
//! use farmu_reports::config::load_config;
//! use farmu_reports::core::export::ReportPeriod;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("farmu-reports.toml")?;
//! let source = create_order_source(&config)?;
//!
//! let rows = source.fetch_order_lines(&ReportPeriod::current()?).await?;
//! println!("{} order lines", rows.len());
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod mysql;
pub mod postgresql;
