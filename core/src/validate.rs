//! Input validation for user-entered fields.
//!
//! Only two fields are validated: the publication year must parse as an
//! integer, and a book id must be a non-negative integer written with ASCII
//! digits. Everything else is accepted as typed.
//!
//! # Examples
//!
//! ```
//! use library_catalog_core::{ValidationError, parse_book_id, parse_year};
//!
//! assert_eq!(parse_year(" 1965 "), Ok(1965));
//! assert!(matches!(parse_year("soon"), Err(ValidationError::InvalidYear(_))));
//!
//! assert_eq!(parse_book_id("42"), Ok(42));
//! assert!(matches!(parse_book_id("-1"), Err(ValidationError::InvalidId(_))));
//! ```

use thiserror::Error;

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Year is not an integer.
    #[error("invalid year '{0}': please enter a number")]
    InvalidYear(String),
    /// Book id is not a non-negative integer.
    #[error("invalid ID '{0}': please enter a numeric ID")]
    InvalidId(String),
}

/// Parses a publication year. Surrounding whitespace is ignored; negative
/// years are accepted.
pub fn parse_year(input: &str) -> Result<i64, ValidationError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidYear(input.trim().to_string()))
}

/// Parses a book id.
///
/// Accepts only a non-empty run of ASCII digits that fits in an `i64`. Signs,
/// inner whitespace and other numerals are rejected so that malformed input
/// never reaches the store.
pub fn parse_book_id(input: &str) -> Result<i64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidId(trimmed.to_string()));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidId(trimmed.to_string()))
}
