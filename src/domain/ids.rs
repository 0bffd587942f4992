//! Domain identifier types with validation
//!
//! Newtype wrappers for the two stable keys of the base dataset. Keeping them
//! distinct prevents a customer code from being written into a product column
//! when the projections are assembled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product identifier newtype wrapper
///
/// The operational database keys products by their barcode, so a product code
/// frequently equals the product's barcode.
///
/// # Examples
///
/// ```
/// use farmu_reports::domain::ids::ProductCode;
/// use std::str::FromStr;
///
/// let code = ProductCode::from_str("7702057070046").unwrap();
/// assert_eq!(code.as_str(), "7702057070046");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductCode(String);

impl ProductCode {
    /// Creates a new ProductCode, rejecting blank values
    pub fn new(code: impl Into<String>) -> Result<Self, String> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err("Product code cannot be empty".to_string());
        }
        Ok(Self(code))
    }

    /// Returns the product code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ProductCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Customer (drugstore) identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use farmu_reports::domain::ids::CustomerCode;
///
/// let code = CustomerCode::new("6254829437225").unwrap();
/// assert_eq!(code.to_string(), "6254829437225");
/// assert!(CustomerCode::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CustomerCode(String);

impl CustomerCode {
    /// Creates a new CustomerCode, rejecting blank values
    pub fn new(code: impl Into<String>) -> Result<Self, String> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err("Customer code cannot be empty".to_string());
        }
        Ok(Self(code))
    }

    /// Returns the customer code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CustomerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustomerCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CustomerCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_code_valid() {
        let code = ProductCode::new("7702057070046").unwrap();
        assert_eq!(code.as_str(), "7702057070046");
        assert_eq!(code.to_string(), "7702057070046");
    }

    #[test]
    fn test_product_code_empty() {
        assert!(ProductCode::new("").is_err());
        assert!(ProductCode::new("   ").is_err());
    }

    #[test]
    fn test_customer_code_from_str() {
        let code = CustomerCode::from_str("C1").unwrap();
        assert_eq!(code.into_inner(), "C1");
    }

    #[test]
    fn test_codes_order_lexicographically() {
        let a = CustomerCode::new("C10").unwrap();
        let b = CustomerCode::new("C2").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_code_serializes_as_plain_string() {
        let code = ProductCode::new("P-1").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"P-1\"");
    }
}
