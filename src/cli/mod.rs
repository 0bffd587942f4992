//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Farmu Reports using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Farmu Reports - monthly sales reports for data-syndication partners
#[derive(Parser, Debug)]
#[command(name = "farmu-reports")]
#[command(version, about, long_about = None)]
#[command(author = "Farmu Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "farmu-reports.toml", env = "FARMU_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FARMU_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate this month's partner workbooks on disk
    Generate(commands::generate::GenerateArgs),

    /// Serve reports over HTTP
    Serve(commands::serve::ServeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
