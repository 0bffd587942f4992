//! MySQL order source
//!
//! Runs the monthly order-line query against the operational store and
//! decodes each row into a [`RawOrderRow`] by column alias.

use super::client::MySqlClient;
use crate::adapters::database::traits::{OrderSource, RawOrderRow};
use crate::core::export::ReportPeriod;
use crate::domain::{ReportError, Result};
use async_trait::async_trait;
use sqlx::mysql::{MySql, MySqlRow};
use sqlx::{Decode, Row, Type};

/// The order-line query, bound with the period's start and end dates
pub const ORDER_LINES_QUERY: &str = include_str!("../../../queries/mysql/order_lines.sql");

/// [`OrderSource`] backed by MySQL
pub struct MySqlOrderSource {
    client: MySqlClient,
}

impl MySqlOrderSource {
    pub fn new(client: MySqlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderSource for MySqlOrderSource {
    async fn query_order_lines(&self, period: &ReportPeriod) -> Result<Vec<RawOrderRow>> {
        let start = period.start();
        let end = period.end();

        tracing::debug!(
            target_db = %self.client.connection_string_safe(),
            start = %start,
            end = %end,
            "Querying order lines"
        );

        let rows = self
            .client
            .query_between(ORDER_LINES_QUERY, start, end)
            .await?;

        rows.iter()
            .enumerate()
            .map(|(index, row)| decode_row(index, row))
            .collect()
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    fn source_name(&self) -> &str {
        "mysql"
    }
}

fn column<'r, T>(index: usize, row: &'r MySqlRow, name: &str) -> Result<Option<T>>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get::<Option<T>, _>(name)
        .map_err(|e| ReportError::malformed(index, format!("column {name}: {e}")))
}

fn decode_row(index: usize, row: &MySqlRow) -> Result<RawOrderRow> {
    Ok(RawOrderRow {
        product_code: column(index, row, "COD_PROD")?,
        product_description: column(index, row, "DESCRIPCION_PROD")?,
        laboratory: column(index, row, "LABORATORIO")?,
        barcode: column(index, row, "COD_BARRA")?,
        customer_code: column(index, row, "COD_CLI")?,
        customer_name: column(index, row, "NOMBRE_CLI")?,
        quantity: column(index, row, "UNIDADES")?,
        unit_price: column(index, row, "PRECIO_UNITARIO")?,
        address: column(index, row, "DIRECCION")?,
        city: column(index, row, "CIUDAD")?,
        department: column(index, row, "DEPARTAMENTO")?,
        order_date: column(index, row, "FECHA")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_selects_every_decoded_column() {
        for alias in [
            "COD_PROD",
            "DESCRIPCION_PROD",
            "LABORATORIO",
            "COD_BARRA",
            "COD_CLI",
            "NOMBRE_CLI",
            "UNIDADES",
            "PRECIO_UNITARIO",
            "DIRECCION",
            "CIUDAD",
            "DEPARTAMENTO",
            "FECHA",
        ] {
            assert!(
                ORDER_LINES_QUERY.contains(&format!("AS {alias},"))
                    || ORDER_LINES_QUERY.contains(&format!("AS {alias}\n")),
                "missing alias {alias}"
            );
        }
    }

    #[test]
    fn test_query_is_mysql_dialect() {
        assert_eq!(ORDER_LINES_QUERY.matches('?').count(), 2);
        assert!(!ORDER_LINES_QUERY.contains("::"));
        assert!(ORDER_LINES_QUERY.contains("co_back_account.drugstores"));
        assert!(ORDER_LINES_QUERY.contains("'cancelled'"));
        assert!(ORDER_LINES_QUERY.contains("final_quantity > 0"));
    }

    #[tokio::test]
    async fn test_unreachable_source_fails_soft() {
        let config = crate::config::DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: Some(1),
            user: "reports".to_string(),
            password: crate::config::secret_string("pw".to_string()),
            name: "farmu".to_string(),
            connection_timeout_seconds: 1,
            ..Default::default()
        };
        let source = MySqlOrderSource::new(MySqlClient::new(config).unwrap());
        let period = ReportPeriod::new(2024, 5).unwrap();

        assert!(matches!(
            source.query_order_lines(&period).await,
            Err(ReportError::DataSourceUnavailable(_))
        ));
        assert!(source.fetch_order_lines(&period).await.unwrap().is_empty());
    }
}
