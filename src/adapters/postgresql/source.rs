//! PostgreSQL order source
//!
//! Runs the monthly order-line query and decodes each row into a
//! [`RawOrderRow`] by column alias.

use super::client::PostgreSQLClient;
use crate::adapters::database::traits::{OrderSource, RawOrderRow};
use crate::core::export::ReportPeriod;
use crate::domain::{ReportError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_postgres::types::FromSql;
use tokio_postgres::Row;

/// The order-line query, bound with the period's start and end dates
pub const ORDER_LINES_QUERY: &str = include_str!("../../../queries/postgresql/order_lines.sql");

/// [`OrderSource`] backed by PostgreSQL
pub struct PostgresOrderSource {
    client: Arc<PostgreSQLClient>,
}

impl PostgresOrderSource {
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl OrderSource for PostgresOrderSource {
    async fn query_order_lines(&self, period: &ReportPeriod) -> Result<Vec<RawOrderRow>> {
        let start = period.start();
        let end = period.end();

        tracing::debug!(
            target_db = %self.client.connection_string_safe(),
            start = %start,
            end = %end,
            "Querying order lines"
        );

        let rows = self.client.query(ORDER_LINES_QUERY, &[&start, &end]).await?;

        rows.iter()
            .enumerate()
            .map(|(index, row)| decode_row(index, row))
            .collect()
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    fn source_name(&self) -> &str {
        "postgresql"
    }
}

fn column<'a, T>(index: usize, row: &'a Row, name: &str) -> Result<Option<T>>
where
    T: FromSql<'a>,
{
    row.try_get::<_, Option<T>>(name)
        .map_err(|e| ReportError::malformed(index, format!("column {name}: {e}")))
}

fn decode_row(index: usize, row: &Row) -> Result<RawOrderRow> {
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
                ORDER_LINES_QUERY.contains(&format!("AS \"{alias}\"")),
                "missing alias {alias}"
            );
        }
    }

    #[test]
    fn test_query_filters() {
        assert!(ORDER_LINES_QUERY.contains("$1::date"));
        assert!(ORDER_LINES_QUERY.contains("$2::date"));
        assert!(ORDER_LINES_QUERY.contains("'cancelled'"));
        assert!(ORDER_LINES_QUERY.contains("final_quantity > 0"));
    }
}
