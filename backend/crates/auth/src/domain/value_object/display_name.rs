//! Display Name Value Object
//!
//! Name shown next to responses and in greetings. Not unique.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for display name (in characters)
pub const DISPLAY_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayNameError {
    Empty,
    TooLong { length: usize, max: usize },
}

impl fmt::Display for DisplayNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Display name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Display name is too long ({length} chars, maximum {max})")
            }
        }
    }
}

impl std::error::Error for DisplayNameError {}

/// Trimmed, non-empty display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, DisplayNameError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DisplayNameError::Empty);
        }
        let length = trimmed.chars().count();
        if length > DISPLAY_NAME_MAX_LENGTH {
            return Err(DisplayNameError::TooLong {
                length,
                max: DISPLAY_NAME_MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = DisplayNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(DisplayName::new(" Alice ").unwrap().as_str(), "Alice");
        assert_eq!(DisplayName::new(" "), Err(DisplayNameError::Empty));
        assert!(DisplayName::new("x".repeat(DISPLAY_NAME_MAX_LENGTH + 1)).is_err());
    }
}
