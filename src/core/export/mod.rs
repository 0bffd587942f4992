//! Report generation and delivery artifacts
//!
//! This module turns the base dataset into files: workbook emission, zip
//! packaging, file naming and orchestration.

pub mod archive;
pub mod coordinator;
pub mod naming;
pub mod period;
pub mod summary;
pub mod xlsx;

pub use archive::{pack, ReportArchive, ReportFile};
pub use coordinator::ReportCoordinator;
pub use naming::{report_file_name, spanish_month};
pub use period::ReportPeriod;
pub use summary::{GeneratedReport, GenerationSummary};
pub use xlsx::{emit, emit_to_buffer};
