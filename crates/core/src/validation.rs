//! Input validation utilities.
//!
//! Range checks for values that reach the core from HTTP or CLI input. Symptom text is validated
//! by `tflow_types::SymptomText`; the checks here cover the numeric inputs.

use crate::constants::MAX_RECENT_LIMIT;
use crate::error::{LimitError, VitalsError};

/// Validates that `value` lies within `range` (inclusive).
///
/// # Errors
///
/// Returns `VitalsError::OutOfRange` naming `field` if the value is outside the range.
pub fn validate_in_range(
    field: &'static str,
    value: i32,
    range: (i32, i32),
) -> Result<(), VitalsError> {
    let (min, max) = range;
    if value < min || value > max {
        return Err(VitalsError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

/// Validates a requested listing size.
///
/// # Errors
///
/// Returns a `LimitError` if `limit` is zero, negative or above [`MAX_RECENT_LIMIT`].
pub fn validate_recent_limit(limit: i64) -> Result<usize, LimitError> {
    match usize::try_from(limit) {
        Ok(n) if (1..=MAX_RECENT_LIMIT).contains(&n) => Ok(n),
        _ => Err(LimitError {
            max: MAX_RECENT_LIMIT,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_accepts_bounds() {
        assert!(validate_in_range("pulse", 30, (30, 250)).is_ok());
        assert!(validate_in_range("pulse", 250, (30, 250)).is_ok());
    }

    #[test]
    fn in_range_reports_field_and_bounds() {
        let err = validate_in_range("pulse", 251, (30, 250)).unwrap_err();
        assert_eq!(
            err,
            VitalsError::OutOfRange {
                field: "pulse",
                min: 30,
                max: 250,
                value: 251
            }
        );
        assert!(err.to_string().contains("pulse"));
    }

    #[test]
    fn recent_limit_bounds() {
        assert_eq!(validate_recent_limit(1), Ok(1));
        assert_eq!(validate_recent_limit(100), Ok(100));
        assert!(validate_recent_limit(0).is_err());
        assert!(validate_recent_limit(101).is_err());
        assert!(validate_recent_limit(-3).is_err());
    }
}
