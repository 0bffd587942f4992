//! Reporting period

use crate::domain::{ReportError, Result};
use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

/// A calendar month, half-open over `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportPeriod {
    /// Creates the period for `month` (1-12) of `year`
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let invalid = || ReportError::Configuration(format!("invalid reporting month {year}-{month}"));

        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;

        Ok(Self { start, end })
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month())
    }

    /// The month containing today, by the local clock
    pub fn current() -> Result<Self> {
        Self::containing(Local::now().date_naive())
    }

    /// The month before this one
    pub fn previous(&self) -> Result<Self> {
        match self.month() {
            1 => Self::new(self.year() - 1, 12),
            month => Self::new(self.year(), month - 1),
        }
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    /// First day of the month (inclusive bound)
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First day of the following month (exclusive bound)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_bounds() {
        let period = ReportPeriod::new(2024, 5).unwrap();
        assert_eq!(period.start(), date(2024, 5, 1));
        assert_eq!(period.end(), date(2024, 6, 1));
        assert!(period.contains(date(2024, 5, 31)));
        assert!(!period.contains(date(2024, 6, 1)));
        assert!(!period.contains(date(2024, 4, 30)));
    }

    #[test]
    fn test_december_rolls_over() {
        let period = ReportPeriod::new(2023, 12).unwrap();
        assert_eq!(period.end(), date(2024, 1, 1));
    }

    #[test]
    fn test_previous_wraps_year() {
        let january = ReportPeriod::containing(date(2024, 1, 17)).unwrap();
        let previous = january.previous().unwrap();
        assert_eq!((previous.year(), previous.month()), (2023, 12));

        let july = ReportPeriod::new(2024, 7).unwrap();
        assert_eq!(july.previous().unwrap().month(), 6);
    }

    #[test]
    fn test_invalid_month() {
        assert!(matches!(
            ReportPeriod::new(2024, 13),
            Err(ReportError::Configuration(_))
        ));
        assert!(ReportPeriod::new(2024, 0).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ReportPeriod::new(2024, 3).unwrap().to_string(), "2024-03");
    }
}
