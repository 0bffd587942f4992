//! Core business logic.
//!
//! # Modules
//!
//! - [`normalize`] - Raw rows to the canonical base dataset
//! - [`projection`] - Base dataset to per-partner sheet bundles
//! - [`export`] - Workbook emission, packaging and orchestration
//!
//! # Report Workflow
//!
//! 1. **Fetch**: Query the month's order lines (an unreachable source gives no rows)
//! 2. **Normalize**: Upper-case display text, canonicalize departments
//! 3. **Project**: Reshape into the IQVIA and CLOSEUP sheet layouts
//! 4. **Emit**: Write one `.xlsx` per format, or zip them in memory
//!
//! # Example
//!
//! ```rust,no_run
//! use farmu_reports::config::load_config;
//! use farmu_reports::core::export::ReportCoordinator;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("farmu-reports.toml")?;
//! let coordinator = ReportCoordinator::from_config(&config)?;
//!
//! let summary = coordinator.write_reports(Path::new("reports")).await?;
//! for path in summary.paths() {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod normalize;
pub mod projection;
