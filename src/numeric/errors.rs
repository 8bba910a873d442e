// ============================================================================
// Numeric Errors
// Error types for fixed-point price arithmetic
// ============================================================================

use std::fmt;

/// Errors that can occur while constructing or combining prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded i64::MAX hundredths
    Overflow,
    /// Result below i64::MIN hundredths
    Underflow,
    /// Value carries more than two fractional digits
    PrecisionLoss,
    /// Input string or value is invalid
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum price")
            },
            NumericError::Underflow => {
                write!(f, "arithmetic underflow: result below minimum price")
            },
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: prices carry at most two fractional digits"
            ),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse price"),
        }
    }
}

impl std::error::Error for NumericError {}

impl NumericError {
    /// `Underflow` for results past the negative end of the range, `Overflow` otherwise
    pub(crate) const fn out_of_range(negative: bool) -> Self {
        if negative {
            NumericError::Underflow
        } else {
            NumericError::Overflow
        }
    }
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: result exceeded maximum price"
        );
        assert_eq!(
            NumericError::PrecisionLoss.to_string(),
            "precision loss: prices carry at most two fractional digits"
        );
    }

    #[test]
    fn test_out_of_range_direction() {
        assert_eq!(NumericError::out_of_range(true), NumericError::Underflow);
        assert_eq!(NumericError::out_of_range(false), NumericError::Overflow);
    }
}
