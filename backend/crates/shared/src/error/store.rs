//! Storage failure classification
//!
//! Maps driver errors onto the few categories domain crates care about.
//! Both `auth` and `quiz` route every `sqlx::Error` through [`classify`].

/// Coarse category of a storage failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreFailure {
    /// Unique constraint violated; carries the constraint name when the driver reports it
    UniqueViolation(Option<String>),
    /// Foreign key constraint violated
    ForeignKeyViolation(Option<String>),
    /// The store could not be reached or refused work (pool, I/O, shutdown)
    Unavailable,
    /// Anything else
    Other,
}

impl StoreFailure {
    #[inline]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreFailure::Unavailable)
    }

    /// True if this is a unique violation on the named constraint
    pub fn is_unique_on(&self, constraint: &str) -> bool {
        matches!(self, StoreFailure::UniqueViolation(Some(name)) if name == constraint)
    }
}

/// Classify a `sqlx::Error`
///
/// PostgreSQL error codes:
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
pub fn classify(err: &sqlx::Error) -> StoreFailure {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreFailure::Unavailable
        }
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().map(str::to_string);
            if db_err.is_unique_violation() {
                return StoreFailure::UniqueViolation(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return StoreFailure::ForeignKeyViolation(constraint);
            }
            match db_err.code().as_deref() {
                // Class 08: Connection Exception
                Some(code) if code.starts_with("08") => StoreFailure::Unavailable,
                // Class 53: Insufficient Resources
                Some(code) if code.starts_with("53") => StoreFailure::Unavailable,
                // Class 57: Operator Intervention (57014 is a cancelled statement)
                Some(code) if code.starts_with("57") => StoreFailure::Unavailable,
                _ => StoreFailure::Other,
            }
        }
        _ => StoreFailure::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_unavailable() {
        assert!(classify(&sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(classify(&sqlx::Error::PoolClosed).is_unavailable());
    }

    #[test]
    fn test_io_error_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(classify(&sqlx::Error::Io(io)).is_unavailable());
    }

    #[test]
    fn test_row_not_found_is_other() {
        assert_eq!(classify(&sqlx::Error::RowNotFound), StoreFailure::Other);
    }

    #[test]
    fn test_is_unique_on() {
        let failure = StoreFailure::UniqueViolation(Some("users_user_name_key".into()));
        assert!(failure.is_unique_on("users_user_name_key"));
        assert!(!failure.is_unique_on("sessions_pkey"));
        assert!(!StoreFailure::UniqueViolation(None).is_unique_on("sessions_pkey"));
    }
}
