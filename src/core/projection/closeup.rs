//! CLOSEUP layout: CLIENTES, FACMES, PRODUCTOS with partner column names

use super::table::{CellValue, ReportBundle, SheetRow, SubTable};
use super::{SHEET_CLIENTS, SHEET_PRODUCTS, SHEET_SALES};
use crate::domain::{BaseTable, OrderLineRecord};
use chrono::NaiveDate;
use std::cmp::Reverse;

struct ClientRow {
    customer_code: String,
    business_name: String,
    address: String,
    city: String,
    department: String,
}

impl SheetRow for ClientRow {
    const HEADERS: &'static [&'static str] = &[
        "CODIGO_CLIENTE",
        "RAZON_SOCIAL",
        "DIRECCION",
        "CIUDAD",
        "DEPARTAMENTO",
    ];

    fn into_cells(self) -> Vec<CellValue> {
        vec![
            self.customer_code.into(),
            self.business_name.into(),
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
            business_name: record.customer_name.clone(),
            address: record.address.clone(),
            city: record.city.clone(),
            department: record.department.clone(),
        }
    }
}

struct SaleRow {
    customer_code: String,
    product_code: String,
    quantity: u32,
    unit_price: f64,
    order_date: NaiveDate,
}

impl SheetRow for SaleRow {
    const HEADERS: &'static [&'static str] = &[
        "CODIGO_CLIENTE",
        "CODIGO_PRODUCTO",
        "UNIDADES",
        "PRECIO_UNITARIO",
        "FECHA",
    ];

    fn into_cells(self) -> Vec<CellValue> {
        vec![
            self.customer_code.into(),
            self.product_code.into(),
            self.quantity.into(),
            self.unit_price.into(),
            self.order_date.into(),
        ]
    }
}

impl From<&OrderLineRecord> for SaleRow {
    fn from(record: &OrderLineRecord) -> Self {
        Self {
            customer_code: record.customer_code.to_string(),
            product_code: record.product_code.to_string(),
            quantity: record.quantity,
            unit_price: record.unit_price,
            order_date: record.order_date,
        }
    }
}

struct ProductRow {
    product_code: String,
    ean: String,
    product_name: String,
    laboratory: String,
    price: f64,
}

impl SheetRow for ProductRow {
    const HEADERS: &'static [&'static str] = &[
        "CODIGO_PRODUCTO",
        "EAN",
        "NOMBRE_PRODUCTO",
        "LABORATORIO",
        "PRECIO",
    ];

    fn into_cells(self) -> Vec<CellValue> {
        vec![
            self.product_code.into(),
            self.ean.into(),
            self.product_name.into(),
            self.laboratory.into(),
            self.price.into(),
        ]
    }
}

impl From<&OrderLineRecord> for ProductRow {
    fn from(record: &OrderLineRecord) -> Self {
        Self {
            product_code: record.product_code.to_string(),
            ean: record.barcode.clone(),
            product_name: record.product_description.clone(),
            laboratory: record.laboratory.clone(),
            price: record.unit_price,
        }
    }
}

pub(super) fn project(base: &BaseTable) -> ReportBundle {
    let mut clients: Vec<ClientRow> = base.iter().map(ClientRow::from).collect();
    clients.sort_by(|a, b| a.customer_code.cmp(&b.customer_code));

    // Newest sales first; the sort is stable so same-day rows keep source order
    let mut sales: Vec<SaleRow> = base.iter().map(SaleRow::from).collect();
    sales.sort_by_key(|row| Reverse(row.order_date));

    let mut products: Vec<ProductRow> = base.iter().map(ProductRow::from).collect();
    products.sort_by(|a, b| a.product_name.cmp(&b.product_name));

    ReportBundle::new(vec![
        SubTable::from_rows(SHEET_CLIENTS, clients),
        SubTable::from_rows(SHEET_SALES, sales),
        SubTable::from_rows(SHEET_PRODUCTS, products),
    ])
}
