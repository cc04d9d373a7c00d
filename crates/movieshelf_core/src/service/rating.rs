//! Boundary-layer parsing for user-entered ratings.
//!
//! # Responsibility
//! - Turn free-text rating input into a validated score before it reaches
//!   the library facade.
//!
//! # Invariants
//! - Both `.` and `,` are accepted as decimal separator.
//! - Accepted scores are strictly between 0 and 10, both ends exclusive.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected rating input.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingParseError {
    /// Input does not parse as a finite number.
    NotANumber(String),
    /// Parsed value falls outside the open interval (0, 10).
    OutOfRange(f64),
}

impl Display for RatingParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber(value) => write!(f, "rating is not a number: `{value}`"),
            Self::OutOfRange(value) => {
                write!(f, "rating must be between 0 and 10 exclusive, got {value}")
            }
        }
    }
}

impl Error for RatingParseError {}

/// Parses user-entered rating text into a score the facade accepts.
///
/// # Errors
/// - `NotANumber` for blank or non-numeric input (including NaN/infinity).
/// - `OutOfRange` for values at or outside the 0..10 bounds.
pub fn parse_user_rating(input: &str) -> Result<f64, RatingParseError> {
    let normalized = input.trim().replace(',', ".");
    let value: f64 = normalized
        .parse()
        .map_err(|_| RatingParseError::NotANumber(input.to_string()))?;
    if !value.is_finite() {
        return Err(RatingParseError::NotANumber(input.to_string()));
    }
    if value <= 0.0 || value >= 10.0 {
        return Err(RatingParseError::OutOfRange(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{parse_user_rating, RatingParseError};

    #[test]
    fn accepts_dot_and_comma_separators() {
        assert_eq!(parse_user_rating("7.5"), Ok(7.5));
        assert_eq!(parse_user_rating("7,5"), Ok(7.5));
        assert_eq!(parse_user_rating(" 9 "), Ok(9.0));
    }

    #[test]
    fn bounds_are_exclusive() {
        assert_eq!(parse_user_rating("0"), Err(RatingParseError::OutOfRange(0.0)));
        assert_eq!(
            parse_user_rating("10"),
            Err(RatingParseError::OutOfRange(10.0))
        );
        assert_eq!(
            parse_user_rating("10,5"),
            Err(RatingParseError::OutOfRange(10.5))
        );
        assert!(parse_user_rating("9.99").is_ok());
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!(matches!(
            parse_user_rating("great"),
            Err(RatingParseError::NotANumber(_))
        ));
        assert!(matches!(
            parse_user_rating(""),
            Err(RatingParseError::NotANumber(_))
        ));
        assert!(matches!(
            parse_user_rating("inf"),
            Err(RatingParseError::NotANumber(_))
        ));
    }
}
