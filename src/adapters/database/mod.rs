//! Data source abstraction layer
//!
//! Report generation reads order lines through the [`OrderSource`] trait, so
//! the MySQL and PostgreSQL adapters can be swapped for an in-memory source in tests.

pub mod factory;
pub mod memory;
pub mod traits;

pub use factory::create_order_source;
pub use memory::StaticOrderSource;
pub use traits::{OrderSource, RawOrderRow};
