//! Common ID Types
//!
//! Type-safe wrappers for store-assigned integer keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Generic typed ID wrapper around a store-assigned `i64` key
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type QuizId = Id<markers::Quiz>;
/// let id = QuizId::from_i64(7);
/// assert_eq!(id.as_i64(), 7);
/// ```
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    value: i64,
    #[serde(skip)]
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a key read from (or assigned by) the store
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying key
    pub const fn as_i64(&self) -> i64 {
        self.value
    }
}

// Manual impls: derives would require `T: Clone`, `T: Eq`, ... on the marker.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for user account IDs
    pub struct User;

    /// Marker for quiz IDs
    pub struct Quiz;

    /// Marker for question IDs
    pub struct Question;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type QuizId = Id<markers::Quiz>;
pub type QuestionId = Id<markers::Question>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_roundtrip() {
        let id = QuizId::from_i64(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_id_is_hashable_without_marker_bounds() {
        let mut set = HashSet::new();
        set.insert(QuestionId::from_i64(1));
        set.insert(QuestionId::from_i64(1));
        set.insert(QuestionId::from_i64(2));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_id_serializes_as_plain_integer() {
        let json = serde_json::to_string(&UserId::from_i64(9)).unwrap();
        assert_eq!(json, "9");
        let back: UserId = serde_json::from_str("9").unwrap();
        assert_eq!(back, UserId::from_i64(9));
    }
}
