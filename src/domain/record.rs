//! Order line records and the base dataset
//!
//! An [`OrderLineRecord`] is one sold product line to a drugstore on a given
//! date. The normalized set of records fetched for a reporting period is the
//! [`BaseTable`] every partner format is projected from.

use super::ids::{CustomerCode, ProductCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sales channel reported for every record
pub const SALES_CHANNEL: &str = "Tradicional";

/// A single sold product line
///
/// Serializes with the column names the partners and the JSON endpoint expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRecord {
    #[serde(rename = "COD_PROD")]
    pub product_code: ProductCode,

    #[serde(rename = "DESCRIPCION_PROD")]
    pub product_description: String,

    #[serde(rename = "LABORATORIO")]
    pub laboratory: String,

    #[serde(rename = "COD_BARRA")]
    pub barcode: String,

    #[serde(rename = "COD_CLI")]
    pub customer_code: CustomerCode,

    #[serde(rename = "NOMBRE_CLI")]
    pub customer_name: String,

    #[serde(rename = "UNIDADES")]
    pub quantity: u32,

    #[serde(rename = "PRECIO_UNITARIO")]
    pub unit_price: f64,

    #[serde(rename = "CANAL_VENTA")]
    pub sales_channel: String,

    #[serde(rename = "DIRECCION")]
    pub address: String,

    #[serde(rename = "CIUDAD")]
    pub city: String,

    #[serde(rename = "DEPARTAMENTO")]
    pub department: String,

    #[serde(rename = "FECHA")]
    pub order_date: NaiveDate,
}

impl OrderLineRecord {
    /// Creates a new builder for OrderLineRecord
    pub fn builder() -> OrderLineRecordBuilder {
        OrderLineRecordBuilder::default()
    }
}

/// Builder for [`OrderLineRecord`]
///
/// Identifying fields, quantity, price and date are required. Descriptive
/// text fields default to empty strings, which is how NULL columns end up in
/// the sheets.
#[derive(Debug, Default)]
pub struct OrderLineRecordBuilder {
    product_code: Option<ProductCode>,
    product_description: String,
    laboratory: String,
    barcode: Option<String>,
    customer_code: Option<CustomerCode>,
    customer_name: String,
    quantity: Option<u32>,
    unit_price: Option<f64>,
    address: String,
    city: String,
    department: String,
    order_date: Option<NaiveDate>,
}

impl OrderLineRecordBuilder {
    /// Creates a new OrderLineRecordBuilder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product_code(mut self, code: ProductCode) -> Self {
        self.product_code = Some(code);
        self
    }

    pub fn product_description(mut self, description: impl Into<String>) -> Self {
        self.product_description = description.into();
        self
    }

    pub fn laboratory(mut self, laboratory: impl Into<String>) -> Self {
        self.laboratory = laboratory.into();
        self
    }

    /// Sets the barcode (defaults to the product code when not set)
    pub fn barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    pub fn customer_code(mut self, code: CustomerCode) -> Self {
        self.customer_code = Some(code);
        self
    }

    pub fn customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = name.into();
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn unit_price(mut self, price: f64) -> Self {
        self.unit_price = Some(price);
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn order_date(mut self, date: NaiveDate) -> Self {
        self.order_date = Some(date);
        self
    }

    /// Builds the OrderLineRecord
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing, the quantity is zero
    /// or the unit price is negative or not finite.
    pub fn build(self) -> Result<OrderLineRecord, String> {
        let product_code = self.product_code.ok_or("product_code is required")?;
        let customer_code = self.customer_code.ok_or("customer_code is required")?;
        let quantity = self.quantity.ok_or("quantity is required")?;
        let unit_price = self.unit_price.ok_or("unit_price is required")?;
        let order_date = self.order_date.ok_or("order_date is required")?;

        if quantity == 0 {
            return Err("quantity must be greater than zero".to_string());
        }
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(format!("unit_price must be a non-negative number, got {unit_price}"));
        }

        let barcode = self
            .barcode
            .unwrap_or_else(|| product_code.as_str().to_string());

        Ok(OrderLineRecord {
            product_code,
            product_description: self.product_description,
            laboratory: self.laboratory,
            barcode,
            customer_code,
            customer_name: self.customer_name,
            quantity,
            unit_price,
            sales_channel: SALES_CHANNEL.to_string(),
            address: self.address,
            city: self.city,
            department: self.department,
            order_date,
        })
    }
}

/// The normalized dataset for one reporting period
///
/// Immutable once built; projections read from it and copy what they need.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BaseTable {
    records: Vec<OrderLineRecord>,
}

impl BaseTable {
    pub fn new(records: Vec<OrderLineRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[OrderLineRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderLineRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<OrderLineRecord> for BaseTable {
    fn from_iter<I: IntoIterator<Item = OrderLineRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
