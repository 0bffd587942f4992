//! PostgreSQL client implementation
//!
//! This module provides the pooled client used to query the order database.

use crate::config::schema::DatabaseConfig;
use crate::domain::{ReportError, Result};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::config::SslMode;
use tokio_postgres::{NoTls, Row};

/// PostgreSQL client
///
/// Wraps a connection pool. Creating the client does not open a
/// connection; the first query does.
pub struct PostgreSQLClient {
    /// Connection pool
    pool: Pool,

    /// Configuration
    config: DatabaseConfig,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] if the pool or TLS connector
    /// cannot be built.
    pub fn new(config: DatabaseConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.connection_timeout_seconds);
        let password: &str = config.password.expose_secret().as_ref();

        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&config.host)
            .port(config.effective_port())
            .user(&config.user)
            .password(password)
            .dbname(&config.name)
            .application_name(env!("CARGO_PKG_NAME"))
            .connect_timeout(timeout);

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = match config.ssl_mode.as_str() {
            "require" => {
                pg_config.ssl_mode(SslMode::Require);
                let connector = native_tls::TlsConnector::builder().build().map_err(|e| {
                    ReportError::Configuration(format!("Failed to build TLS connector: {}", e))
                })?;
                Manager::from_config(pg_config, MakeTlsConnector::new(connector), manager_config)
            }
            _ => {
                pg_config.ssl_mode(SslMode::Disable);
                Manager::from_config(pg_config, NoTls, manager_config)
            }
        };

        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(timeout))
            .create_timeout(Some(timeout))
            .recycle_timeout(Some(timeout))
            .runtime(deadpool_postgres::Runtime::Tokio1)
            .build()
            .map_err(|e| {
                ReportError::Configuration(format!("Failed to create connection pool: {}", e))
            })?;

        Ok(Self { pool, config })
    }

    /// Test the connection to PostgreSQL
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client.query_one("SELECT 1", &[]).await.map_err(|e| {
            ReportError::DataSourceUnavailable(format!("Connection test failed: {}", e))
        })?;

        tracing::info!(target_db = %self.connection_string_safe(), "PostgreSQL connection test successful");
        Ok(())
    }

    /// Get a connection from the pool
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::DataSourceUnavailable`] if no connection can be
    /// obtained.
    pub async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            ReportError::DataSourceUnavailable(format!(
                "Failed to get connection from pool: {}",
                e
            ))
        })
    }

    /// Execute a query and return rows
    ///
    /// The session `statement_timeout` is set before the query runs.
    pub async fn query(
        &self,
        query: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<Vec<Row>> {
        let client = self.get_connection().await?;

        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds * 1000
        );
        client.batch_execute(&timeout_query).await.map_err(|e| {
            ReportError::DataSourceUnavailable(format!("Failed to set statement timeout: {}", e))
        })?;

        client
            .query(query, params)
            .await
            .map_err(|e| ReportError::DataSourceUnavailable(format!("Query failed: {}", e)))
    }

    /// Get the connection target (without password)
    pub fn connection_string_safe(&self) -> String {
        self.config.connection_string_safe()
    }

    /// Get the pool statistics
    pub fn pool_status(&self) -> deadpool_postgres::Status {
        self.pool.status()
    }
}
