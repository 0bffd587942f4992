//! PostgreSQL integration
//!
//! This module provides the pooled client and the order source that reads
//! monthly order lines from PostgreSQL.

pub mod client;
pub mod source;

pub use client::PostgreSQLClient;
pub use source::{PostgresOrderSource, ORDER_LINES_QUERY};
