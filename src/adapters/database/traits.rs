//! Data source abstraction traits
//!
//! This module defines the trait that order-line sources must implement to
//! feed report generation.

use crate::core::export::ReportPeriod;
use crate::domain::{ReportError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

/// One order line as returned by the data source, before normalization
///
/// Every column is optional: the source reports NULLs as they are and the
/// normalizer decides which absences are fatal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOrderRow {
    pub product_code: Option<String>,
    pub product_description: Option<String>,
    pub laboratory: Option<String>,
    pub barcode: Option<String>,
    pub customer_code: Option<String>,
    pub customer_name: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<f64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub department: Option<String>,
    pub order_date: Option<NaiveDate>,
}

/// Source of monthly order lines
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Runs the order-line query for the given month
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::DataSourceUnavailable`] when the source cannot
    /// be reached or the query fails, and [`ReportError::MalformedRow`] when a
    /// returned row cannot be decoded.
    async fn query_order_lines(&self, period: &ReportPeriod) -> Result<Vec<RawOrderRow>>;

    /// Fetches order lines, treating an unreachable source as "no data"
    ///
    /// Connection and query failures are logged and produce an empty row
    /// set. Decoding failures still propagate.
    async fn fetch_order_lines(&self, period: &ReportPeriod) -> Result<Vec<RawOrderRow>> {
        match self.query_order_lines(period).await {
            Ok(rows) => {
                tracing::info!(
                    source = self.source_name(),
                    period = %period,
                    rows = rows.len(),
                    "Fetched order lines"
                );
                Ok(rows)
            }
            Err(ReportError::DataSourceUnavailable(message)) => {
                tracing::error!(
                    source = self.source_name(),
                    period = %period,
                    error = %message,
                    "Data source unavailable, continuing with no rows"
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Check the source is reachable
    async fn test_connection(&self) -> Result<()>;

    /// Short name used in logs
    fn source_name(&self) -> &str;
}
