//! Result type alias for the report pipeline

use super::errors::ReportError;

/// Result type alias for report operations
///
/// # Examples
///
/// ```
/// use farmu_reports::domain::result::Result;
/// use farmu_reports::domain::errors::ReportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ReportError::UnsupportedFormat("nielsen".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ReportError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(ReportError::Io("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
