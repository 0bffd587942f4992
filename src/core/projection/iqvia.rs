//! IQVIA layout: PRODUCTOS, CLIENTES, FACMES with the base column names

use super::table::{CellValue, ReportBundle, SheetRow, SubTable};
use super::{SHEET_CLIENTS, SHEET_PRODUCTS, SHEET_SALES};
use crate::domain::{BaseTable, OrderLineRecord};
use chrono::NaiveDate;

struct ProductRow {
    product_code: String,
    description: String,
    laboratory: String,
    unit_price: f64,
    barcode: String,
}

impl SheetRow for ProductRow {
    const HEADERS: &'static [&'static str] = &[
        "COD_PROD",
        "DESCRIPCION_PROD",
        "LABORATORIO",
        "PRECIO_UNITARIO",
        "COD_BARRA",
    ];

    fn into_cells(self) -> Vec<CellValue> {
        vec![
            self.product_code.into(),
            self.description.into(),
            self.laboratory.into(),
            self.unit_price.into(),
            self.barcode.into(),
        ]
    }
}

impl From<&OrderLineRecord> for ProductRow {
    fn from(record: &OrderLineRecord) -> Self {
        Self {
            product_code: record.product_code.to_string(),
            description: record.product_description.clone(),
            laboratory: record.laboratory.clone(),
            unit_price: record.unit_price,
            barcode: record.barcode.clone(),
        }
    }
}

struct ClientRow {
    customer_code: String,
    customer_name: String,
    address: String,
    city: String,
    department: String,
}

impl SheetRow for ClientRow {
    const HEADERS: &'static [&'static str] =
        &["COD_CLI", "NOMBRE_CLI", "DIRECCION", "CIUDAD", "DEPARTAMENTO"];

    fn into_cells(self) -> Vec<CellValue> {
        vec![
            self.customer_code.into(),
            self.customer_name.into(),
            self.address.into(),
            self.city.into(),
            self.department.into(),
        ]
    }
}

impl From<&OrderLineRecord> for ClientRow {
    fn from(record: &OrderLineRecord) -> Self {
        Self {
            customer_code: record.customer_code.to_string(),
            customer_name: record.customer_name.clone(),
            address: record.address.clone(),
            city: record.city.clone(),
            department: record.department.clone(),
        }
    }
}

struct SaleRow {
    product_code: String,
    description: String,
    customer_code: String,
    customer_name: String,
    quantity: u32,
    unit_price: f64,
    order_date: NaiveDate,
    sales_channel: String,
}

impl SheetRow for SaleRow {
    const HEADERS: &'static [&'static str] = &[
        "COD_PROD",
        "DESCRIPCION_PROD",
        "COD_CLI",
        "NOMBRE_CLI",
        "UNIDADES",
        "PRECIO_UNITARIO",
        "FECHA",
        "CANAL_VENTA",
    ];

    fn into_cells(self) -> Vec<CellValue> {
        vec![
            self.product_code.into(),
            self.description.into(),
            self.customer_code.into(),
            self.customer_name.into(),
            self.quantity.into(),
            self.unit_price.into(),
            self.order_date.into(),
            self.sales_channel.into(),
        ]
    }
}

impl From<&OrderLineRecord> for SaleRow {
    fn from(record: &OrderLineRecord) -> Self {
        Self {
            product_code: record.product_code.to_string(),
            description: record.product_description.clone(),
            customer_code: record.customer_code.to_string(),
            customer_name: record.customer_name.clone(),
            quantity: record.quantity,
            unit_price: record.unit_price,
            order_date: record.order_date,
            sales_channel: record.sales_channel.clone(),
        }
    }
}

pub(super) fn project(base: &BaseTable) -> ReportBundle {
    let mut products: Vec<ProductRow> = base.iter().map(ProductRow::from).collect();
    products.sort_by(|a, b| a.description.cmp(&b.description));

    let mut clients: Vec<ClientRow> = base.iter().map(ClientRow::from).collect();
    clients.sort_by(|a, b| a.customer_code.cmp(&b.customer_code));

    let mut sales: Vec<SaleRow> = base.iter().map(SaleRow::from).collect();
    sales.sort_by_key(|row| row.order_date);

    ReportBundle::new(vec![
        SubTable::from_rows(SHEET_PRODUCTS, products),
        SubTable::from_rows(SHEET_CLIENTS, clients),
        SubTable::from_rows(SHEET_SALES, sales),
    ])
}
