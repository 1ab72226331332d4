//! User Name Value Object
//!
//! ユーザー名はログインに使う一意な識別子。
//!
//! ## 設計方針
//! - 前後の空白は除去する
//! - 大文字・小文字は区別する（`alice` と `Alice` は別ユーザー）
//! - 文字種の制限はしない（制御文字のみ拒否）
//!
//! ## 不変条件
//! - 空でない（trim 後）
//! - 長さ: 1〜[`USER_NAME_MAX_LENGTH`] 文字

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty after trimming
    Empty,

    /// User name is too long (maximum: USER_NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// User name contains a control character
    ControlCharacter,
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "User name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "User name is too long ({length} chars, maximum {max})")
            }
            Self::ControlCharacter => write!(f, "User name cannot contain control characters"),
        }
    }
}

impl std::error::Error for UserNameError {}

/// Validated user name (trimmed, case preserved)
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let trimmed = input.as_ref().trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(UserNameError::ControlCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_preserves_case() {
        let name = UserName::new("  Alice ").unwrap();
        assert_eq!(name.as_str(), "Alice");
        assert_ne!(name, UserName::new("alice").unwrap());
    }

    #[test]
    fn test_empty() {
        assert_eq!(UserName::new(""), Err(UserNameError::Empty));
        assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
    }

    #[test]
    fn test_too_long() {
        let long = "a".repeat(USER_NAME_MAX_LENGTH + 1);
        assert!(matches!(
            UserName::new(long),
            Err(UserNameError::TooLong { .. })
        ));
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_control_character() {
        assert_eq!(
            UserName::new("al\u{0}ice"),
            Err(UserNameError::ControlCharacter)
        );
    }

    #[test]
    fn test_unicode_allowed() {
        assert_eq!(UserName::new("たろう").unwrap().as_str(), "たろう");
    }

    #[test]
    fn test_serde_validates() {
        let name: UserName = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(name.as_str(), "bob");
        assert!(serde_json::from_str::<UserName>("\"  \"").is_err());
    }
}
