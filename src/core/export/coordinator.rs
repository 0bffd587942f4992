//! Report coordinator - main orchestrator for report generation
//!
//! Ties the pipeline together: fetch order lines for the period, normalize
//! them once, then project and emit one workbook per partner format.

use super::archive::{pack, ReportArchive, ReportFile};
use super::naming::report_file_name;
use super::period::ReportPeriod;
use super::summary::{GeneratedReport, GenerationSummary};
use super::xlsx;
use crate::adapters::database::{create_order_source, OrderSource};
use crate::config::{ReportConfig, ReportsConfig};
use crate::core::normalize::normalize;
use crate::core::projection::{project, ReportBundle};
use crate::domain::{BaseTable, ReportError, ReportFormat, Result};
use crate::{log_report_complete, log_report_start};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Report coordinator
///
/// Every call re-fetches from the source; nothing is cached between calls.
pub struct ReportCoordinator {
    source: Arc<dyn OrderSource>,
    report: ReportConfig,
    period: Option<ReportPeriod>,
}

impl ReportCoordinator {
    /// Create a coordinator over an existing source
    pub fn new(source: Arc<dyn OrderSource>, report: ReportConfig) -> Self {
        Self {
            source,
            report,
            period: None,
        }
    }

    /// Create a coordinator reading from the configured database
    pub fn from_config(config: &ReportsConfig) -> Result<Self> {
        let source = create_order_source(config)?;
        Ok(Self::new(source, config.report.clone()))
    }

    /// Pin the reporting month instead of using the current one
    pub fn with_period(mut self, period: ReportPeriod) -> Self {
        self.period = Some(period);
        self
    }

    /// The month being queried
    pub fn period(&self) -> Result<ReportPeriod> {
        match self.period {
            Some(period) => Ok(period),
            None => ReportPeriod::current(),
        }
    }

    /// File name of one format's workbook for the current period
    pub fn file_name(&self, format: ReportFormat) -> Result<String> {
        let label = self.period()?.previous()?;
        Ok(report_file_name(&self.report.file_prefix, &label, format))
    }

    /// Fetches and normalizes the base dataset
    ///
    /// An unreachable source yields an empty table.
    pub async fn base_records(&self) -> Result<BaseTable> {
        let period = self.period()?;
        let rows = self.source.fetch_order_lines(&period).await?;
        normalize(rows)
    }

    /// The sheet bundle of one partner format
    pub async fn report_bundle(&self, format: ReportFormat) -> Result<ReportBundle> {
        let base = self.base_records().await?;
        Ok(project(&base, format))
    }

    /// Writes one workbook per format into `dir`
    ///
    /// With no data the workbooks still get written, holding header-only
    /// sheets; [`GenerationSummary::has_no_data`] reports the condition.
    pub async fn write_reports(&self, dir: &Path) -> Result<GenerationSummary> {
        self.write_reports_for(dir, &ReportFormat::ALL).await
    }

    /// Like [`Self::write_reports`] for a subset of formats
    pub async fn write_reports_for(
        &self,
        dir: &Path,
        formats: &[ReportFormat],
    ) -> Result<GenerationSummary> {
        let start_time = Instant::now();
        let period = self.period()?;
        let label = period.previous()?;
        log_report_start!(period, "files");

        std::fs::create_dir_all(dir).map_err(|e| {
            ReportError::Io(format!("Failed to create output directory {}: {}", dir.display(), e))
        })?;

        let base = self.base_records().await?;
        let mut summary = GenerationSummary::new(period, label);
        summary.base_rows = base.len();

        for format in formats {
            let bundle = project(&base, *format);
            let path = dir.join(report_file_name(&self.report.file_prefix, &label, *format));
            xlsx::emit(&bundle, &path)?;

            summary.add_report(GeneratedReport {
                format: *format,
                path,
                sheets: bundle.sheets().len(),
                rows: bundle.total_rows(),
            });
        }

        let summary = summary.with_duration(start_time.elapsed());
        log_report_complete!(summary.base_rows, summary.reports.len(), summary.duration);
        Ok(summary)
    }

    /// Builds the zip with every format's workbook, in memory
    ///
    /// Returns `None` when the period has no order lines.
    pub async fn build_archive(&self) -> Result<Option<ReportArchive>> {
        let start_time = Instant::now();
        let period = self.period()?;
        let label = period.previous()?;
        log_report_start!(period, "archive");

        let base = self.base_records().await?;
        if base.is_empty() {
            tracing::warn!(period = %period, "No order lines, skipping archive");
            return Ok(None);
        }

        let mut files = Vec::with_capacity(ReportFormat::ALL.len());
        for format in ReportFormat::ALL {
            let bundle = project(&base, format);
            let bytes = xlsx::emit_to_buffer(&bundle)?;
            files.push(ReportFile::new(
                report_file_name(&self.report.file_prefix, &label, format),
                bytes,
            ));
        }

        let archive = pack(&self.report.archive_name, &files)?;
        log_report_complete!(base.len(), files.len(), start_time.elapsed());
        Ok(Some(archive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::database::{RawOrderRow, StaticOrderSource};
    use chrono::NaiveDate;

    fn row(customer: &str, day: u32) -> RawOrderRow {
        RawOrderRow {
            product_code: Some("7702057070046".to_string()),
            product_description: Some("acetaminofen".to_string()),
            laboratory: Some("Genfar".to_string()),
            barcode: Some("7702057070046".to_string()),
            customer_code: Some(customer.to_string()),
            customer_name: Some("Drogueria".to_string()),
            quantity: Some(1),
            unit_price: Some(900.0),
            address: Some("cra 7".to_string()),
            city: Some("bogota".to_string()),
            department: Some("BOGOTA".to_string()),
            order_date: NaiveDate::from_ymd_opt(2024, 5, day),
        }
    }

    fn coordinator(source: StaticOrderSource) -> ReportCoordinator {
        ReportCoordinator::new(Arc::new(source), ReportConfig::default())
            .with_period(ReportPeriod::new(2024, 5).unwrap())
    }

    #[test]
    fn test_file_name_uses_previous_month() {
        let coordinator = coordinator(StaticOrderSource::default());
        assert_eq!(
            coordinator.file_name(ReportFormat::Closeup).unwrap(),
            "Data Farmu Abril 2024 closeup.xlsx"
        );
    }

    #[tokio::test]
    async fn test_base_records_normalizes() {
        let coordinator = coordinator(StaticOrderSource::new(vec![row("C1", 3)]));
        let base = coordinator.base_records().await.unwrap();
        assert_eq!(base.len(), 1);
        assert_eq!(base.records()[0].department, "BOGOTÁ, D.C.");
    }

    #[tokio::test]
    async fn test_unavailable_source_means_no_data() {
        let coordinator = coordinator(StaticOrderSource::unavailable("refused"));
        assert!(coordinator.base_records().await.unwrap().is_empty());
        assert!(coordinator.build_archive().await.unwrap().is_none());

        let bundle = coordinator.report_bundle(ReportFormat::Iqvia).await.unwrap();
        assert!(bundle.is_empty());
        assert_eq!(bundle.sheets().len(), 3);
    }

    #[tokio::test]
    async fn test_write_reports_writes_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let coordinator = coordinator(StaticOrderSource::new(vec![row("C1", 3), row("C2", 9)]));

        let summary = coordinator.write_reports(dir.path()).await.unwrap();
        assert_eq!(summary.base_rows, 2);
        assert_eq!(summary.reports.len(), 2);
        for report in &summary.reports {
            assert!(report.path.exists());
            assert_eq!(report.sheets, 3);
            assert_eq!(report.rows, 6);
        }
        assert!(dir.path().join("Data Farmu Abril 2024 iqvia.xlsx").exists());
    }

    #[tokio::test]
    async fn test_write_reports_without_data_writes_header_only_files() {
        let dir = tempfile::tempdir().unwrap();
        let coordinator = coordinator(StaticOrderSource::default());

        let summary = coordinator
            .write_reports_for(dir.path(), &[ReportFormat::Closeup])
            .await
            .unwrap();
        assert!(summary.has_no_data());
        assert_eq!(summary.reports.len(), 1);
        assert!(summary.reports[0].path.exists());
    }

    #[tokio::test]
    async fn test_build_archive_holds_both_workbooks() {
        let coordinator = coordinator(StaticOrderSource::new(vec![row("C1", 3)]));
        let archive = coordinator.build_archive().await.unwrap().unwrap();

        assert_eq!(archive.name, "Reportes_Farmu.zip");
        assert_eq!(
            archive.entries,
            vec![
                "Data Farmu Abril 2024 iqvia.xlsx".to_string(),
                "Data Farmu Abril 2024 closeup.xlsx".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_malformed_rows_propagate() {
        let mut bad = row("C1", 3);
        bad.customer_code = None;
        let coordinator = coordinator(StaticOrderSource::new(vec![bad]));

        assert!(matches!(
            coordinator.base_records().await,
            Err(ReportError::MalformedRow { .. })
        ));
    }
}
