//! Entity normalization
//!
//! Turns the loosely-typed rows returned by the data source into the
//! canonical [`BaseTable`]: display text upper-cased, departments folded onto
//! their canonical names, required columns checked.

mod department;

pub use department::canonicalize_department;

use crate::adapters::database::RawOrderRow;
use crate::domain::{BaseTable, CustomerCode, OrderLineRecord, ProductCode, ReportError, Result};

/// Normalizes raw rows into the base dataset
///
/// An empty input produces an empty table. A row missing an identifying
/// column, or with a non-positive quantity, fails the whole call with
/// [`ReportError::MalformedRow`]; structural problems are never skipped.
pub fn normalize(raw_rows: Vec<RawOrderRow>) -> Result<BaseTable> {
    let total = raw_rows.len();
    let records = raw_rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| normalize_row(index, row))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(rows = total, "Normalized order lines");
    Ok(BaseTable::new(records))
}

fn normalize_row(index: usize, row: RawOrderRow) -> Result<OrderLineRecord> {
    let product_code = row
        .product_code
        .ok_or_else(|| ReportError::malformed(index, "missing COD_PROD"))
        .and_then(|code| {
            ProductCode::new(code).map_err(|e| ReportError::malformed(index, e))
        })?;

    let customer_code = row
        .customer_code
        .ok_or_else(|| ReportError::malformed(index, "missing COD_CLI"))
        .and_then(|code| {
            CustomerCode::new(code).map_err(|e| ReportError::malformed(index, e))
        })?;

    let quantity = row
        .quantity
        .ok_or_else(|| ReportError::malformed(index, "missing UNIDADES"))?;
    let quantity = u32::try_from(quantity).map_err(|_| {
        ReportError::malformed(index, format!("UNIDADES out of range: {quantity}"))
    })?;

    let unit_price = row
        .unit_price
        .ok_or_else(|| ReportError::malformed(index, "missing PRECIO_UNITARIO"))?;
    let order_date = row
        .order_date
        .ok_or_else(|| ReportError::malformed(index, "missing FECHA"))?;

    let mut builder = OrderLineRecord::builder()
        .product_code(product_code)
        .product_description(upper(row.product_description))
        .laboratory(row.laboratory.unwrap_or_default())
        .customer_code(customer_code)
        .customer_name(row.customer_name.unwrap_or_default())
        .quantity(quantity)
        .unit_price(unit_price)
        .address(upper(row.address))
        .city(upper(row.city))
        .department(canonicalize_department(
            row.department.as_deref().unwrap_or_default(),
        ))
        .order_date(order_date);

    if let Some(barcode) = row.barcode {
        builder = builder.barcode(barcode);
    }

    builder
        .build()
        .map_err(|reason| ReportError::malformed(index, reason))
}

fn upper(value: Option<String>) -> String {
    value.map(|v| v.to_uppercase()).unwrap_or_default()
}
