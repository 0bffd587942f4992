//! Order source factory
//!
//! This module builds the order source described by the configuration.

use crate::adapters::database::traits::OrderSource;
use crate::adapters::mysql::{MySqlClient, MySqlOrderSource};
use crate::adapters::postgresql::{PostgreSQLClient, PostgresOrderSource};
use crate::config::{DatabaseEngine, ReportsConfig};
use crate::domain::Result;
use std::sync::Arc;

/// Create the order source for the configured database engine
///
/// The pool is created lazily, so this succeeds even when the database is
/// down; queries then fail soft. Must be called inside a Tokio runtime.
///
/// # Errors
///
/// Returns an error if the connection pool cannot be configured
pub fn create_order_source(config: &ReportsConfig) -> Result<Arc<dyn OrderSource>> {
    tracing::info!(
        engine = %config.database.engine,
        target_db = %config.database.connection_string_safe(),
        ssl_mode = %config.database.ssl_mode,
        "Creating order source"
    );

    match config.database.engine {
        DatabaseEngine::Mysql => {
            let client = MySqlClient::new(config.database.clone())?;
            Ok(Arc::new(MySqlOrderSource::new(client)) as Arc<dyn OrderSource>)
        }
        DatabaseEngine::Postgresql => {
            let client = PostgreSQLClient::new(config.database.clone())?;
            Ok(Arc::new(PostgresOrderSource::new(client)) as Arc<dyn OrderSource>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config(engine: DatabaseEngine) -> ReportsConfig {
        let mut config = ReportsConfig::default();
        config.database.engine = engine;
        config.database.user = "reports".to_string();
        config.database.password = secret_string("pw".to_string());
        config.database.name = "farmu".to_string();
        config
    }

    #[tokio::test]
    async fn test_source_follows_engine() {
        let source = create_order_source(&config(DatabaseEngine::Mysql)).unwrap();
        assert_eq!(source.source_name(), "mysql");

        let source = create_order_source(&config(DatabaseEngine::Postgresql)).unwrap();
        assert_eq!(source.source_name(), "postgresql");
    }
}
