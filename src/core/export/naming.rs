//! Report file naming

use super::period::ReportPeriod;
use crate::domain::ReportFormat;

const SPANISH_MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Spanish name of a month number (1-12)
pub fn spanish_month(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    SPANISH_MONTHS.get(index).copied()
}

/// File name of one partner workbook, e.g. `Data Farmu Abril 2024 iqvia.xlsx`
///
/// `label` is the month named in the file, which is the month before the
/// one being queried.
pub fn report_file_name(prefix: &str, label: &ReportPeriod, format: ReportFormat) -> String {
    // ReportPeriod always holds a valid month
    let month = spanish_month(label.month()).unwrap_or_default();
    format!("{prefix} {month} {} {}.xlsx", label.year(), format.as_str())
}
