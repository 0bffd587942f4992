//! In-memory order source
//!
//! Serves a fixed set of rows, filtered by period. Used wherever a
//! database is not at hand, mostly tests.

use super::traits::{OrderSource, RawOrderRow};
use crate::core::export::ReportPeriod;
use crate::domain::{ReportError, Result};
use async_trait::async_trait;

/// An [`OrderSource`] backed by a vector of rows
#[derive(Debug, Clone, Default)]
pub struct StaticOrderSource {
    rows: Vec<RawOrderRow>,
    unavailable: Option<String>,
}

impl StaticOrderSource {
    pub fn new(rows: Vec<RawOrderRow>) -> Self {
        Self {
            rows,
            unavailable: None,
        }
    }

    /// A source whose every query fails as unreachable
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            unavailable: Some(message.into()),
        }
    }
}

#[async_trait]
impl OrderSource for StaticOrderSource {
    async fn query_order_lines(&self, period: &ReportPeriod) -> Result<Vec<RawOrderRow>> {
        if let Some(message) = &self.unavailable {
            return Err(ReportError::DataSourceUnavailable(message.clone()));
        }

        // Rows without a date are kept so the normalizer can reject them
        Ok(self
            .rows
            .iter()
            .filter(|row| row.order_date.map_or(true, |d| period.contains(d)))
            .cloned()
            .collect())
    }

    async fn test_connection(&self) -> Result<()> {
        match &self.unavailable {
            Some(message) => Err(ReportError::DataSourceUnavailable(message.clone())),
            None => Ok(()),
        }
    }

    fn source_name(&self) -> &str {
        "memory"
    }
}
