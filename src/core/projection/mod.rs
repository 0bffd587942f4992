//! Partner format projection
//!
//! Each partner receives the same base dataset reshaped into three sheets
//! with its own column names, column order and row ordering.

mod closeup;
mod iqvia;
mod table;

pub use table::{CellValue, ReportBundle, SheetRow, SubTable};

use crate::domain::{BaseTable, ReportFormat, Result};

/// Product catalog sheet
pub const SHEET_PRODUCTS: &str = "PRODUCTOS";
/// Customer sheet
pub const SHEET_CLIENTS: &str = "CLIENTES";
/// Monthly sales lines sheet
pub const SHEET_SALES: &str = "FACMES";

/// Projects the base dataset into a partner's sheet bundle
///
/// Every row of the base table appears once in every sheet. Sorting is
/// stable, so rows with equal keys keep their base order.
pub fn project(base: &BaseTable, format: ReportFormat) -> ReportBundle {
    let bundle = match format {
        ReportFormat::Iqvia => iqvia::project(base),
        ReportFormat::Closeup => closeup::project(base),
    };
    tracing::debug!(
        format = %format,
        sheets = bundle.sheets().len(),
        rows = base.len(),
        "Projected report bundle"
    );
    bundle
}

/// Like [`project`], parsing the format identifier first
pub fn project_named(base: &BaseTable, format: &str) -> Result<ReportBundle> {
    let format: ReportFormat = format.parse()?;
    Ok(project(base, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerCode, OrderLineRecord, ProductCode, ReportError};
    use chrono::NaiveDate;

    fn record(product: &str, description: &str, customer: &str, day: u32) -> OrderLineRecord {
        OrderLineRecord::builder()
            .product_code(ProductCode::new(product).unwrap())
            .product_description(description)
            .laboratory("LAB")
            .customer_code(CustomerCode::new(customer).unwrap())
            .customer_name(format!("Cliente {customer}"))
            .quantity(2)
            .unit_price(1500.0)
            .address("CALLE 1")
            .city("BOGOTA")
            .department("BOGOTÁ, D.C.")
            .order_date(NaiveDate::from_ymd_opt(2024, 5, day).unwrap())
            .build()
            .unwrap()
    }

    fn base() -> BaseTable {
        BaseTable::new(vec![
            record("P2", "IBUPROFENO", "C3", 10),
            record("P1", "ACETAMINOFEN", "C1", 1),
            record("P3", "LORATADINA", "C2", 20),
        ])
    }

    fn texts<'a>(sheet: &'a SubTable, column: &str) -> Vec<&'a str> {
        sheet
            .column(column)
            .unwrap()
            .into_iter()
            .map(|cell| match cell {
                CellValue::Text(s) => s.as_str(),
                other => panic!("expected text, got {other:?}"),
            })
            .collect()
    }

    fn dates(sheet: &SubTable) -> Vec<u32> {
        use chrono::Datelike;
        sheet
            .column("FECHA")
            .unwrap()
            .into_iter()
            .map(|cell| match cell {
                CellValue::Date(d) => d.day(),
                other => panic!("expected date, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_iqvia_sheet_layout() {
        let bundle = project(&base(), ReportFormat::Iqvia);
        assert_eq!(bundle.sheet_names(), vec!["PRODUCTOS", "CLIENTES", "FACMES"]);

        let products = bundle.sheet(SHEET_PRODUCTS).unwrap();
        assert_eq!(
            products.columns(),
            ["COD_PROD", "DESCRIPCION_PROD", "LABORATORIO", "PRECIO_UNITARIO", "COD_BARRA"]
        );
        assert_eq!(
            texts(products, "DESCRIPCION_PROD"),
            vec!["ACETAMINOFEN", "IBUPROFENO", "LORATADINA"]
        );

        let clients = bundle.sheet(SHEET_CLIENTS).unwrap();
        assert_eq!(texts(clients, "COD_CLI"), vec!["C1", "C2", "C3"]);

        let sales = bundle.sheet(SHEET_SALES).unwrap();
        assert_eq!(sales.columns().len(), 8);
        assert_eq!(dates(sales), vec![1, 10, 20]);
        assert_eq!(
            texts(sales, "CANAL_VENTA"),
            vec!["Tradicional", "Tradicional", "Tradicional"]
        );
    }

    #[test]
    fn test_closeup_sheet_layout() {
        let bundle = project(&base(), ReportFormat::Closeup);
        assert_eq!(bundle.sheet_names(), vec!["CLIENTES", "FACMES", "PRODUCTOS"]);

        let clients = bundle.sheet(SHEET_CLIENTS).unwrap();
        assert_eq!(
            clients.columns(),
            ["CODIGO_CLIENTE", "RAZON_SOCIAL", "DIRECCION", "CIUDAD", "DEPARTAMENTO"]
        );
        assert_eq!(texts(clients, "CODIGO_CLIENTE"), vec!["C1", "C2", "C3"]);

        let sales = bundle.sheet(SHEET_SALES).unwrap();
        assert_eq!(dates(sales), vec![20, 10, 1]);

        let products = bundle.sheet(SHEET_PRODUCTS).unwrap();
        assert_eq!(
            texts(products, "NOMBRE_PRODUCTO"),
            vec!["ACETAMINOFEN", "IBUPROFENO", "LORATADINA"]
        );
        assert_eq!(texts(products, "EAN"), vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let base = BaseTable::new(vec![
            record("P1", "SAME", "C9", 5),
            record("P2", "SAME", "C1", 5),
        ]);

        let iqvia = project(&base, ReportFormat::Iqvia);
        let products = iqvia.sheet(SHEET_PRODUCTS).unwrap();
        assert_eq!(texts(products, "COD_PROD"), vec!["P1", "P2"]);

        let closeup = project(&base, ReportFormat::Closeup);
        let sales = closeup.sheet(SHEET_SALES).unwrap();
        assert_eq!(texts(sales, "CODIGO_CLIENTE"), vec!["C9", "C1"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let base = BaseTable::new(vec![
            record("P1", "ACETAMINOFEN", "C1", 1),
            record("P1", "ACETAMINOFEN", "C1", 1),
        ]);
        let bundle = project(&base, ReportFormat::Closeup);
        for sheet in bundle.sheets() {
            assert_eq!(sheet.row_count(), 2);
        }
    }

    #[test]
    fn test_empty_base_gives_header_only_sheets() {
        let bundle = project(&BaseTable::default(), ReportFormat::Iqvia);
        assert_eq!(bundle.sheets().len(), 3);
        assert!(bundle.is_empty());
        for sheet in bundle.sheets() {
            assert!(!sheet.columns().is_empty());
        }
    }

    #[test]
    fn test_project_named_rejects_unknown_format() {
        let err = project_named(&base(), "nielsen").unwrap_err();
        assert!(matches!(err, ReportError::UnsupportedFormat(_)));

        let bundle = project_named(&base(), "CLOSEUP").unwrap();
        assert_eq!(bundle.sheet_names()[0], "CLIENTES");
    }
}
