//! Generate command implementation
//!
//! This module implements the `generate` command, which writes the month's
//! partner workbooks to the output directory.

use crate::config::load_config;
use crate::core::export::{GenerationSummary, ReportCoordinator};
use crate::domain::ReportFormat;
use crate::log_error_with_context;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Override the output directory from `[report] output_dir`
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Only generate these formats (repeatable; default: all)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Vec<ReportFormat>,
}

impl GenerateArgs {
    /// Execute the generate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting generate command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let output_dir = PathBuf::from(
            self.output_dir
                .clone()
                .unwrap_or_else(|| config.report.output_dir.clone()),
        );

        let coordinator = match ReportCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create report coordinator");
                eprintln!("Failed to initialize report generation: {e}");
                return Ok(5);
            }
        };

        self.run(&coordinator, &output_dir).await
    }

    /// Runs generation with an already built coordinator
    pub async fn run(&self, coordinator: &ReportCoordinator, output_dir: &Path) -> anyhow::Result<i32> {
        let formats = self.formats();

        println!("🚀 Generating reports into {}", output_dir.display());
        println!();

        let summary = match coordinator.write_reports_for(output_dir, &formats).await {
            Ok(s) => s,
            Err(e) => {
                log_error_with_context!(&e, "Report generation failed");
                eprintln!("❌ Report generation failed: {e}");
                return Ok(5);
            }
        };

        summary.log_summary();
        print_summary(&summary);

        Ok(exit_code(&summary))
    }

    fn formats(&self) -> Vec<ReportFormat> {
        if self.format.is_empty() {
            ReportFormat::ALL.to_vec()
        } else {
            self.format.clone()
        }
    }
}

fn print_summary(summary: &GenerationSummary) {
    println!("📊 Report Summary");
    println!("  Period: {}", summary.period);
    println!("  Label: {}", summary.label);
    println!("  Order lines: {}", summary.base_rows);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    for report in &summary.reports {
        println!(
            "  ✅ {} ({} sheets, {} rows)",
            report.path.display(),
            report.sheets,
            report.rows
        );
    }
    println!();

    if summary.has_no_data() {
        println!("⚠️  No order lines found for {}; workbooks contain headers only", summary.period);
    }
}

/// 0 when the period had order lines, 3 when it had none
fn exit_code(summary: &GenerationSummary) -> i32 {
    if summary.has_no_data() {
        3
    } else {
        0
    }
}
