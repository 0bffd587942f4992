//! Integration tests reading emitted workbooks back with calamine

use calamine::{open_workbook_auto, open_workbook_from_rs, Data, DataType, Reader, Xlsx};
use chrono::NaiveDate;
use farmu_reports::adapters::database::RawOrderRow;
use farmu_reports::core::export::{emit, emit_to_buffer};
use farmu_reports::core::normalize::normalize;
use farmu_reports::core::projection::{project, ReportBundle};
use farmu_reports::domain::ReportFormat;
use regex::Regex;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use tempfile::TempDir;
use zip::ZipArchive;

fn bundle(format: ReportFormat, rows: Vec<RawOrderRow>) -> ReportBundle {
    project(&normalize(rows).unwrap(), format)
}

fn sample_row() -> RawOrderRow {
    RawOrderRow {
        product_code: Some("7702057070046".to_string()),
        product_description: Some("acetaminofen 500mg".to_string()),
        laboratory: Some("Genfar".to_string()),
        barcode: Some("7702057070046".to_string()),
        customer_code: Some("C1".to_string()),
        customer_name: Some("Drogueria Central".to_string()),
        quantity: Some(3),
        unit_price: Some(1250.5),
        address: Some("cra 7".to_string()),
        city: Some("bogota".to_string()),
        department: Some("BOGOTA".to_string()),
        order_date: NaiveDate::from_ymd_opt(2024, 5, 14),
    }
}

#[test]
fn test_iqvia_workbook_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("iqvia.xlsx");
    emit(&bundle(ReportFormat::Iqvia, vec![sample_row()]), &path).unwrap();

    let mut workbook = open_workbook_auto(&path).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["PRODUCTOS", "CLIENTES", "FACMES"]);

    let sales = workbook.worksheet_range("FACMES").unwrap();
    assert_eq!(sales.height(), 2);
    assert_eq!(
        sales.get((0, 0)),
        Some(&Data::String("COD_PROD".to_string()))
    );
    assert_eq!(
        sales.get((1, 1)),
        Some(&Data::String("ACETAMINOFEN 500MG".to_string()))
    );
    assert_eq!(sales.get((1, 4)), Some(&Data::Float(3.0)));
    assert_eq!(sales.get((1, 5)), Some(&Data::Float(1250.5)));
    assert_eq!(
        sales.get((1, 6)).and_then(|cell| cell.as_date()),
        NaiveDate::from_ymd_opt(2024, 5, 14)
    );
    assert_eq!(
        sales.get((1, 7)),
        Some(&Data::String("Tradicional".to_string()))
    );
}

#[test]
fn test_closeup_workbook_from_buffer() {
    let bytes = emit_to_buffer(&bundle(ReportFormat::Closeup, vec![sample_row()])).unwrap();

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["CLIENTES", "FACMES", "PRODUCTOS"]);

    let clients = workbook.worksheet_range("CLIENTES").unwrap();
    assert_eq!(
        clients.get((1, 4)),
        Some(&Data::String("BOGOTÁ, D.C.".to_string()))
    );

    let products = workbook.worksheet_range("PRODUCTOS").unwrap();
    let headers: Vec<String> = products
        .rows()
        .next()
        .unwrap()
        .iter()
        .map(|cell| cell.to_string())
        .collect();
    assert_eq!(
        headers,
        vec!["CODIGO_PRODUCTO", "EAN", "NOMBRE_PRODUCTO", "LABORATORIO", "PRECIO"]
    );
}

fn sale(customer: &str, product: &str, price: f64, day: u32) -> RawOrderRow {
    RawOrderRow {
        product_code: Some(product.to_string()),
        barcode: Some(product.to_string()),
        customer_code: Some(customer.to_string()),
        unit_price: Some(price),
        order_date: NaiveDate::from_ymd_opt(2024, 5, day),
        ..sample_row()
    }
}

/// Column widths stored in one worksheet part, keyed by 1-based column
fn stored_widths(bytes: &[u8], sheet_index: usize) -> BTreeMap<u32, f64> {
    let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut xml = String::new();
    zip.by_name(&format!("xl/worksheets/sheet{sheet_index}.xml"))
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();

    let re = Regex::new(r#"<col min="(\d+)" max="(\d+)" width="([0-9.]+)""#).unwrap();
    let mut widths = BTreeMap::new();
    for caps in re.captures_iter(&xml) {
        let min: u32 = caps[1].parse().unwrap();
        let max: u32 = caps[2].parse().unwrap();
        let width: f64 = caps[3].parse().unwrap();
        for col in min..=max {
            widths.insert(col, width);
        }
    }
    widths
}

/// Excel stores widths with cell padding added, so the stored value sits
/// just above the requested one
fn assert_width(widths: &BTreeMap<u32, f64>, col: u32, requested: f64) {
    let stored = widths[&col];
    assert!(
        stored >= requested && stored < requested + 1.0,
        "column {col}: stored {stored}, requested {requested}"
    );
}

#[test]
fn test_closeup_sales_read_back_newest_first() {
    let rows = vec![
        sale("C3", "P3", 1000.0, 3),
        sale("C1", "P1", 1000.0, 20),
        sale("C4", "P4", 1000.0, 11),
        sale("C2", "P2", 1000.0, 20),
    ];
    let bytes = emit_to_buffer(&bundle(ReportFormat::Closeup, rows)).unwrap();

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let sales = workbook.worksheet_range("FACMES").unwrap();
    assert_eq!(sales.height(), 5);

    let read_back: Vec<(String, NaiveDate)> = sales
        .rows()
        .skip(1)
        .map(|row| (row[0].to_string(), row[4].as_date().unwrap()))
        .collect();
    let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
    assert_eq!(
        read_back,
        vec![
            ("C1".to_string(), day(20)),
            ("C2".to_string(), day(20)),
            ("C4".to_string(), day(11)),
            ("C3".to_string(), day(3)),
        ]
    );
}

#[test]
fn test_column_widths_are_written_to_the_file() {
    let rows = vec![sale("C1", "P1", 12000.0, 2), sale("C2", "P2", 35.5, 9)];
    let bytes = emit_to_buffer(&bundle(ReportFormat::Closeup, rows)).unwrap();

    // CLOSEUP tab order: CLIENTES, FACMES, PRODUCTOS
    let sales = stored_widths(&bytes, 2);
    assert_width(&sales, 1, 19.2); // CODIGO_CLIENTE
    assert_width(&sales, 2, 20.4); // CODIGO_PRODUCTO
    assert_width(&sales, 3, 12.0); // UNIDADES
    assert_width(&sales, 4, 20.4); // PRECIO_UNITARIO
    assert_width(&sales, 5, 14.4); // dates render as 2024-05-09

    // "12000.0" is longer than the PRECIO header
    let products = stored_widths(&bytes, 3);
    assert_width(&products, 5, 10.8);
}

#[test]
fn test_empty_bundle_writes_header_only_sheets() {
    let bytes = emit_to_buffer(&bundle(ReportFormat::Iqvia, vec![])).unwrap();

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    for name in ["PRODUCTOS", "CLIENTES", "FACMES"] {
        let range = workbook.worksheet_range(name).unwrap();
        assert_eq!(range.height(), 1, "{name} should only hold headers");
    }
}

#[test]
fn test_bundle_without_sheets_is_still_a_valid_workbook() {
    let bytes = emit_to_buffer(&ReportBundle::default()).unwrap();

    let workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names().len(), 1);
}
