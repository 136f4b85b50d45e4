//! Result type alias for punkt-export

use super::errors::PunktError;

/// Result type alias for punkt-export operations
///
/// # Examples
///
/// ```
/// use punkt_export::domain::result::Result;
/// use punkt_export::domain::errors::PunktError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PunktError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PunktError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(PunktError::Validation("test error".to_string()));
        assert!(result.is_err());
    }
}
