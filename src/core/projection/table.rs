//! Sheet-shaped tables
//!
//! Projections build typed rows (one struct per sheet layout) and erase them
//! into [`SubTable`]s so the emitter and the JSON endpoints can treat every
//! sheet the same way.

use crate::domain::{ReportError, Result};
use chrono::NaiveDate;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A single typed cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Date(NaiveDate),
}

impl CellValue {
    /// Text rendering of the cell, used for column sizing
    pub fn render(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Decimal(f) => render_decimal(*f),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Whole decimals keep one fractional digit, so `1200.0` sizes as
/// `"1200.0"` rather than `"1200"`
fn render_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Decimal(f) => serializer.serialize_f64(*f),
            CellValue::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Integer(i64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Decimal(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

/// A typed row of one sheet layout
pub trait SheetRow {
    /// Column headers, in output order
    const HEADERS: &'static [&'static str];

    /// Cells in the same order as [`Self::HEADERS`]
    fn into_cells(self) -> Vec<CellValue>;
}

/// One sheet's worth of rows and columns
#[derive(Debug, Clone, PartialEq)]
pub struct SubTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl SubTable {
    /// Creates a sub-table, checking every row has one cell per column
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self> {
        let name = name.into();
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(ReportError::Spreadsheet(format!(
                "sheet {name}: row {index} has {} cells, expected {}",
                row.len(),
                columns.len()
            )));
        }
        Ok(Self {
            name,
            columns,
            rows,
        })
    }

    /// Erases typed rows into a sub-table
    pub fn from_rows<R: SheetRow>(name: &str, rows: Vec<R>) -> Self {
        Self {
            name: name.to_string(),
            columns: R::HEADERS.iter().map(|h| (*h).to_string()).collect(),
            rows: rows.into_iter().map(SheetRow::into_cells).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, top to bottom
    pub fn column(&self, header: &str) -> Option<Vec<&CellValue>> {
        let index = self.columns.iter().position(|c| c == header)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }
}

/// Serializes as an array of `{column: value}` objects in column order
impl Serialize for SubTable {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        struct RowRef<'a> {
            columns: &'a [String],
            cells: &'a [CellValue],
        }

        impl Serialize for RowRef<'_> {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let mut map = serializer.serialize_map(Some(self.columns.len()))?;
                for (column, cell) in self.columns.iter().zip(self.cells) {
                    map.serialize_entry(column, cell)?;
                }
                map.end()
            }
        }

        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for cells in &self.rows {
            seq.serialize_element(&RowRef {
                columns: &self.columns,
                cells,
            })?;
        }
        seq.end()
    }
}

/// Ordered sheets making up one partner report
///
/// Sheet order is part of the output contract: it is the tab order of the
/// workbook and the key order of the JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportBundle {
    sheets: Vec<SubTable>,
}

impl ReportBundle {
    pub fn new(sheets: Vec<SubTable>) -> Self {
        Self { sheets }
    }

    pub fn sheets(&self) -> &[SubTable] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&SubTable> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(SubTable::name).collect()
    }

    /// True when no sheet holds any data row
    pub fn is_empty(&self) -> bool {
        self.sheets.iter().all(SubTable::is_empty)
    }

    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(SubTable::row_count).sum()
    }
}

impl Serialize for ReportBundle {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.sheets.len()))?;
        for sheet in &self.sheets {
            map.serialize_entry(sheet.name(), sheet)?;
        }
        map.end()
    }
}
