//! Application Configuration
//!
//! Configuration for the Quiz application layer.

use std::time::Duration;

use crate::error::{QuizError, QuizResult};

/// Quiz application configuration
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// Upper bound on any single store call (5 seconds)
    pub store_timeout: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl QuizConfig {
    /// Load configuration from the process environment
    ///
    /// Reads `QUIZ_STORE_TIMEOUT_SECS`; unset keeps the default.
    pub fn from_env() -> QuizResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> QuizResult<Self> {
        let mut config = Self::default();
        if let Some(secs) = lookup("QUIZ_STORE_TIMEOUT_SECS") {
            let secs = secs.trim().parse().map_err(|_| {
                QuizError::InvalidInput(
                    "QUIZ_STORE_TIMEOUT_SECS must be a whole number of seconds".to_string(),
                )
            })?;
            config.store_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup() {
        let config = QuizConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.store_timeout, Duration::from_secs(5));

        let config = QuizConfig::from_lookup(|_| Some("9".into())).unwrap();
        assert_eq!(config.store_timeout, Duration::from_secs(9));

        assert!(QuizConfig::from_lookup(|_| Some("nine".into())).is_err());
    }
}
