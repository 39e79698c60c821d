use thiserror::Error;

/// Precondition failures for the sizing rules.
///
/// The rules themselves are total over positive finite ratings; these errors
/// only come out of the `try_*` entry points and the `check`/`validate`
/// methods that guard them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    #[error("{field} is not finite: {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for SizingError {
    fn from(errors: validator::ValidationErrors) -> Self {
        SizingError::Validation(errors.to_string())
    }
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), SizingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SizingError::NotFinite { field, value })
    }
}

pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<(), SizingError> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(SizingError::NonPositive { field, value });
    }
    Ok(())
}

pub(crate) fn ensure_in_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), SizingError> {
    ensure_finite(field, value)?;
    if value < min || value > max {
        return Err(SizingError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
