//! MySQL integration
//!
//! The operational order store. Provides the pooled sqlx client and the
//! order source that reads monthly order lines from it.

pub mod client;
pub mod source;

pub use client::MySqlClient;
pub use source::{MySqlOrderSource, ORDER_LINES_QUERY};
