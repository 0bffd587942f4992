// Farmu Reports - Monthly partner sales reports
// Copyright (c) 2025 Farmu Contributors
// Licensed under the MIT License

//! # Farmu Reports
//!
//! Farmu Reports pulls a month of order lines out of the operational
//! database and reshapes them into the workbook layouts two
//! data-syndication partners, IQVIA and CLOSEUP, expect every month.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** the month's order lines, with an unreachable database
//!   treated as a month without sales
//! - **Normalizing** rows into one canonical base dataset
//! - **Projecting** the base dataset into per-partner sheet bundles
//! - **Delivering** the result as `.xlsx` files on disk, a zip over HTTP, or JSON
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (normalize, projection, export)
//! - [`adapters`] - External integrations (MySQL, PostgreSQL, in-memory source)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`server`] - HTTP delivery
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use farmu_reports::config::load_config;
//! use farmu_reports::core::export::ReportCoordinator;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("farmu-reports.toml")?;
//!     let coordinator = ReportCoordinator::from_config(&config)?;
//!
//!     let summary = coordinator.write_reports(Path::new("reports")).await?;
//!     println!("Wrote {} workbooks from {} order lines", summary.reports.len(), summary.base_rows);
//!     Ok(())
//! }
//! ```
//!
//! ## Projections Without a Database
//!
//! The pipeline stages are plain functions over owned data, so they can be
//! driven from rows built in memory:
//!
//! ```rust
//! use farmu_reports::adapters::database::RawOrderRow;
//! use farmu_reports::core::{normalize::normalize, projection::project};
//! use farmu_reports::domain::ReportFormat;
//! use chrono::NaiveDate;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let rows = vec![RawOrderRow {
//!     product_code: Some("7702057070046".to_string()),
//!     customer_code: Some("C1".to_string()),
//!     quantity: Some(3),
//!     unit_price: Some(1200.0),
//!     department: Some("BOGOTA".to_string()),
//!     order_date: NaiveDate::from_ymd_opt(2024, 5, 2),
//!     ..Default::default()
//! }];
//!
//! let base = normalize(rows)?;
//! let bundle = project(&base, ReportFormat::Closeup);
//! assert_eq!(bundle.sheet_names(), vec!["CLIENTES", "FACMES", "PRODUCTOS"]);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod server;
