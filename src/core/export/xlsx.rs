//! Spreadsheet emitter
//!
//! Writes a [`ReportBundle`] as an `.xlsx` workbook: one worksheet per
//! sub-table, a bold header row, typed cells, and columns sized to their
//! widest value.

use crate::core::projection::{CellValue, ReportBundle, SubTable};
use crate::domain::{ReportError, Result};
use chrono::Datelike;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};
use std::path::Path;

const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Writes the bundle to `path`, replacing any existing file
pub fn emit(bundle: &ReportBundle, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(bundle)?;
    workbook.save(path)?;

    tracing::debug!(
        path = %path.display(),
        sheets = bundle.sheets().len(),
        "Wrote workbook"
    );
    Ok(())
}

/// Serializes the bundle to an in-memory workbook
pub fn emit_to_buffer(bundle: &ReportBundle) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(bundle)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(bundle: &ReportBundle) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    if bundle.sheets().is_empty() {
        // A workbook needs at least one worksheet to be valid
        workbook.add_worksheet();
        return Ok(workbook);
    }

    for table in bundle.sheets() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(table.name())?;
        write_table(worksheet, table, &header_format, &date_format)?;
    }

    Ok(workbook)
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &SubTable,
    header_format: &Format,
    date_format: &Format,
) -> Result<()> {
    for (col, header) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, column_index(col)?, header, header_format)?;
    }

    for (index, cells) in table.rows().iter().enumerate() {
        let row = u32::try_from(index + 1)
            .map_err(|_| ReportError::Spreadsheet(format!("sheet {} has too many rows", table.name())))?;
        for (col, cell) in cells.iter().enumerate() {
            let col = column_index(col)?;
            match cell {
                CellValue::Text(value) => {
                    worksheet.write_string(row, col, value)?;
                }
                CellValue::Integer(value) => {
                    worksheet.write_number(row, col, *value as f64)?;
                }
                CellValue::Decimal(value) => {
                    worksheet.write_number(row, col, *value)?;
                }
                CellValue::Date(date) => {
                    let datetime = excel_date(*date)?;
                    worksheet.write_datetime_with_format(row, col, &datetime, date_format)?;
                }
            }
        }
    }

    for (col, width) in column_widths(table).into_iter().enumerate() {
        worksheet.set_column_width(column_index(col)?, width)?;
    }

    Ok(())
}

/// Width of each column: (longest rendered value, header included, + 2) * 1.2
pub(crate) fn column_widths(table: &SubTable) -> Vec<f64> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let longest = table
                .rows()
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.render().chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0);
            (longest as f64 + 2.0) * 1.2
        })
        .collect()
}

fn column_index(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| ReportError::Spreadsheet(format!("column {col} out of range")))
}

fn excel_date(date: chrono::NaiveDate) -> Result<ExcelDateTime> {
    let year = u16::try_from(date.year())
        .map_err(|_| ReportError::Spreadsheet(format!("date out of range: {date}")))?;
    // month() and day() are always below 32
    Ok(ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn table() -> SubTable {
        SubTable::new(
            "FACMES",
            vec!["COD".to_string(), "FECHA".to_string()],
            vec![
                vec![
                    CellValue::from("ACETAMINOFEN 500MG"),
                    CellValue::from(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
                ],
                vec![CellValue::from("X"), CellValue::from(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap())],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_column_widths_use_longest_value() {
        let widths = column_widths(&table());
        // "ACETAMINOFEN 500MG" has 18 characters
        assert!((widths[0] - 24.0).abs() < 1e-9);
        // "2024-05-01" has 10 characters, longer than the header
        assert!((widths[1] - 14.4).abs() < 1e-9);
    }

    #[test]
    fn test_column_widths_header_only() {
        let empty = SubTable::new("X", vec!["DEPARTAMENTO".to_string()], vec![]).unwrap();
        let widths = column_widths(&empty);
        assert!((widths[0] - 16.8).abs() < 1e-9);
    }

    #[test]
    fn test_column_widths_count_characters_not_bytes() {
        let accented = SubTable::new(
            "X",
            vec!["D".to_string()],
            vec![vec![CellValue::from("BOGOTÁ, D.C.")]],
        )
        .unwrap();
        assert!((column_widths(&accented)[0] - 16.8).abs() < 1e-9);
    }

    #[test]
    fn test_column_widths_size_whole_prices_with_fraction() {
        let prices = SubTable::new(
            "X",
            vec!["P".to_string()],
            vec![vec![CellValue::from(1200.0)], vec![CellValue::from(99.5)]],
        )
        .unwrap();
        // "1200.0" has 6 characters
        assert!((column_widths(&prices)[0] - 9.6).abs() < 1e-9);
    }

    #[test]
    fn test_emit_to_buffer_produces_zip_container() {
        let bundle = ReportBundle::new(vec![table()]);
        let bytes = emit_to_buffer(&bundle).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_empty_bundle_is_still_a_workbook() {
        let bytes = emit_to_buffer(&ReportBundle::default()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_emit_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        emit(&ReportBundle::new(vec![table()]), &path).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }
}
