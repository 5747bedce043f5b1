//! Name validation for rooms and snapshots
//!
//! Names are single command words:
//! - Non-empty, at most 64 characters
//! - Characters from `[0-9A-Za-z_.+-]`
//! - Case-sensitive (no normalization)

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Maximum name length in characters
pub const MAX_NAME_LEN: usize = 64;

/// Validation errors for room and snapshot names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Name is empty
    Empty,
    /// Name is longer than [`MAX_NAME_LEN`]
    TooLong,
    /// Name contains a character outside the word set
    InvalidCharacters(String),
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::Empty => write!(f, "Name cannot be empty"),
            NameError::TooLong => {
                write!(f, "Name must be {} characters or less", MAX_NAME_LEN)
            }
            NameError::InvalidCharacters(name) => {
                write!(
                    f,
                    "Name '{}' contains invalid characters (allowed: letters, digits, '_', '.', '+', '-')",
                    name
                )
            }
        }
    }
}

impl std::error::Error for NameError {}

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_.+-]+$").expect("word pattern is valid"));

/// Validate a room or snapshot name.
///
/// # Examples
/// ```
/// use roomgraph::rooms::validate_name;
///
/// assert!(validate_name("Hall_1").is_ok());
/// assert!(validate_name("cellar.v2").is_ok());
///
/// assert!(validate_name("").is_err());
/// assert!(validate_name("two words").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<&str, NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(NameError::TooLong);
    }

    if !WORD_REGEX.is_match(name) {
        return Err(NameError::InvalidCharacters(name.to_string()));
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(validate_name("a"), Ok("a"));
        assert_eq!(validate_name("Hall"), Ok("Hall"));
        assert_eq!(validate_name("room-1.b+c_d"), Ok("room-1.b+c_d"));
        assert_eq!(validate_name("123"), Ok("123"));

        let max = "x".repeat(MAX_NAME_LEN);
        assert!(validate_name(&max).is_ok());
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(validate_name("MixedCase"), Ok("MixedCase"));
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_name(""), Err(NameError::Empty));
    }

    #[test]
    fn test_too_long() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(validate_name(&long), Err(NameError::TooLong));
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            validate_name("two words"),
            Err(NameError::InvalidCharacters("two words".to_string()))
        );
        assert_eq!(
            validate_name("slash/room"),
            Err(NameError::InvalidCharacters("slash/room".to_string()))
        );
        assert!(validate_name("caf\u{e9}").is_err());
    }
}
