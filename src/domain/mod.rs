//! Domain models and types for the report pipeline.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ProductCode`], [`CustomerCode`])
//! - **Domain models** ([`OrderLineRecord`], [`BaseTable`], [`ReportFormat`])
//! - **Error types** ([`ReportError`])
//! - **Result type alias** ([`Result`])
//!
//! # Builder Pattern
//!
//! Records are assembled with a builder that enforces the record invariants:
//!
//! ```rust
//! use farmu_reports::domain::{CustomerCode, OrderLineRecord, ProductCode};
//! use chrono::NaiveDate;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let record = OrderLineRecord::builder()
//!     .product_code(ProductCode::new("7702057070046")?)
//!     .customer_code(CustomerCode::new("C1")?)
//!     .quantity(2)
//!     .unit_price(1500.0)
//!     .order_date(NaiveDate::from_ymd_opt(2024, 5, 3).unwrap())
//!     .build()?;
//! assert_eq!(record.sales_channel, "Tradicional");
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod format;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::ReportError;
pub use format::ReportFormat;
pub use ids::{CustomerCode, ProductCode};
pub use record::{BaseTable, OrderLineRecord, OrderLineRecordBuilder, SALES_CHANNEL};
pub use result::Result;
