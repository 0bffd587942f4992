//! Partner report formats

use crate::domain::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Data-syndication partner layout a report is shaped for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// IQVIA layout: PRODUCTOS, CLIENTES, FACMES
    Iqvia,
    /// CLOSEUP layout: CLIENTES, FACMES, PRODUCTOS
    Closeup,
}

impl ReportFormat {
    /// Every supported format, in the order reports are generated
    pub const ALL: [ReportFormat; 2] = [ReportFormat::Iqvia, ReportFormat::Closeup];

    /// Lower-case identifier used in file names, routes and the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Iqvia => "iqvia",
            ReportFormat::Closeup => "closeup",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "iqvia" => Ok(Self::Iqvia),
            "closeup" => Ok(Self::Closeup),
            _ => Err(ReportError::UnsupportedFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format_from_str() {
        assert_eq!(ReportFormat::from_str("iqvia").unwrap(), ReportFormat::Iqvia);
        assert_eq!(ReportFormat::from_str("IQVIA").unwrap(), ReportFormat::Iqvia);
        assert_eq!(
            ReportFormat::from_str(" CloseUp ").unwrap(),
            ReportFormat::Closeup
        );
    }

    #[test]
    fn test_report_format_unknown() {
        let err = ReportFormat::from_str("nielsen").unwrap_err();
        assert!(matches!(err, ReportError::UnsupportedFormat(ref f) if f == "nielsen"));
    }

    #[test]
    fn test_report_format_display_round_trips() {
        for format in ReportFormat::ALL {
            assert_eq!(ReportFormat::from_str(&format.to_string()).unwrap(), format);
        }
    }
}
