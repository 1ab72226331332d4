use serde::{Deserialize, Serialize};
use std::fmt;

/// Role fixed at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum UserRole {
    /// Creates quizzes and reviews responses
    Teacher = 0,
    /// Attempts quizzes
    Student = 1,
}

/// Unrecognized role code or id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown role '{}'. Expected 'teacher' or 'student'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Teacher => "teacher",
            Student => "student",
        }
    }

    #[inline]
    pub const fn is_teacher(&self) -> bool {
        matches!(self, UserRole::Teacher)
    }

    #[inline]
    pub const fn is_student(&self) -> bool {
        matches!(self, UserRole::Student)
    }

    pub fn from_id(id: i16) -> Result<Self, UnknownRole> {
        use UserRole::*;
        match id {
            0 => Ok(Teacher),
            1 => Ok(Student),
            _ => Err(UnknownRole(id.to_string())),
        }
    }

    /// Parse a role code; exact lowercase match only
    pub fn from_code(code: &str) -> Result<Self, UnknownRole> {
        use UserRole::*;
        match code {
            "teacher" => Ok(Teacher),
            "student" => Ok(Student),
            _ => Err(UnknownRole(code.to_string())),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_id() {
        assert_eq!(UserRole::from_id(0), Ok(UserRole::Teacher));
        assert_eq!(UserRole::from_id(1), Ok(UserRole::Student));
        assert!(UserRole::from_id(2).is_err());
    }

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("teacher"), Ok(UserRole::Teacher));
        assert_eq!(UserRole::from_code("student"), Ok(UserRole::Student));
        assert!(UserRole::from_code("admin").is_err());
        assert!(UserRole::from_code("Student").is_err());
        assert!(UserRole::from_code("").is_err());
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::Teacher.to_string(), "teacher");
        assert_eq!(UserRole::Student.to_string(), "student");
    }

    #[test]
    fn test_user_role_serializes_as_code() {
        assert_eq!(
            serde_json::to_string(&UserRole::Student).unwrap(),
            "\"student\""
        );
    }
}
