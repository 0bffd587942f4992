//! Generation summary and reporting

use super::period::ReportPeriod;
use crate::domain::ReportFormat;
use std::path::PathBuf;
use std::time::Duration;

/// One workbook written to disk
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub format: ReportFormat,
    pub path: PathBuf,
    /// Number of worksheets in the workbook
    pub sheets: usize,
    /// Data rows across all worksheets
    pub rows: usize,
}

/// Summary of a generation run
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Month the data was queried for
    pub period: ReportPeriod,

    /// Month named in the file names
    pub label: ReportPeriod,

    /// Rows in the base dataset
    pub base_rows: usize,

    /// Workbooks written, in format order
    pub reports: Vec<GeneratedReport>,

    pub duration: Duration,
}

impl GenerationSummary {
    pub fn new(period: ReportPeriod, label: ReportPeriod) -> Self {
        Self {
            period,
            label,
            base_rows: 0,
            reports: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn add_report(&mut self, report: GeneratedReport) {
        self.reports.push(report);
    }

    /// True when the data source returned nothing for the period
    pub fn has_no_data(&self) -> bool {
        self.base_rows == 0
    }

    pub fn paths(&self) -> Vec<&PathBuf> {
        self.reports.iter().map(|r| &r.path).collect()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            period = %self.period,
            label = %self.label,
            base_rows = self.base_rows,
            files = self.reports.len(),
            duration_ms = self.duration.as_millis() as u64,
            "Report generation completed"
        );

        for report in &self.reports {
            tracing::info!(
                format = %report.format,
                path = %report.path.display(),
                sheets = report.sheets,
                rows = report.rows,
                "Report written"
            );
        }

        if self.has_no_data() {
            tracing::warn!(period = %self.period, "No order lines found for period");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period() -> ReportPeriod {
        ReportPeriod::new(2024, 5).unwrap()
    }

    #[test]
    fn test_new_summary_has_no_data() {
        let summary = GenerationSummary::new(period(), period().previous().unwrap());
        assert!(summary.has_no_data());
        assert!(summary.reports.is_empty());
        assert_eq!(summary.label.month(), 4);
    }

    #[test]
    fn test_add_report() {
        let mut summary = GenerationSummary::new(period(), period());
        summary.base_rows = 3;
        summary.add_report(GeneratedReport {
            format: ReportFormat::Iqvia,
            path: PathBuf::from("/tmp/a.xlsx"),
            sheets: 3,
            rows: 9,
        });

        let summary = summary.with_duration(Duration::from_millis(250));
        assert!(!summary.has_no_data());
        assert_eq!(summary.paths(), vec![&PathBuf::from("/tmp/a.xlsx")]);
        assert_eq!(summary.duration.as_millis(), 250);
    }
}
