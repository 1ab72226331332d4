//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use platform::password::{Argon2Hasher, PasswordHasher, Sha256Hasher};

use crate::error::{AuthError, AuthResult};

/// Password digest scheme for new and existing credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordScheme {
    /// Salted Argon2id with explicit cost parameters
    Argon2id {
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    },
    /// Unsalted SHA-256 hex; deterministic fast-digest mode, opt-in only
    LegacySha256,
}

impl Default for PasswordScheme {
    /// OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        PasswordScheme::Argon2id {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session lifetime from login (1 hour)
    pub session_ttl: Duration,
    /// Upper bound on any single store call (5 seconds)
    pub store_timeout: Duration,
    /// Random bytes per session token (32 = 256 bits)
    pub token_bytes: usize,
    /// Fresh tokens tried before a collision becomes an internal error
    pub token_issue_attempts: u32,
    pub password_scheme: PasswordScheme,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(3600),
            store_timeout: Duration::from_secs(5),
            token_bytes: 32,
            token_issue_attempts: 3,
            password_scheme: PasswordScheme::default(),
            password_pepper: None,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_ttl", &self.session_ttl)
            .field("store_timeout", &self.store_timeout)
            .field("token_bytes", &self.token_bytes)
            .field("token_issue_attempts", &self.token_issue_attempts)
            .field("password_scheme", &self.password_scheme)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl AuthConfig {
    /// Create config for development and tests (cheap Argon2 parameters)
    pub fn development() -> Self {
        Self {
            password_scheme: PasswordScheme::Argon2id {
                memory_kib: 64,
                iterations: 1,
                parallelism: 1,
            },
            ..Default::default()
        }
    }

    /// Load configuration from the process environment
    ///
    /// Unset variables keep their defaults:
    /// - `AUTH_SESSION_TTL_SECS`
    /// - `AUTH_STORE_TIMEOUT_SECS`
    /// - `AUTH_PASSWORD_SCHEME` (`argon2id` | `legacy-sha256`)
    /// - `AUTH_PASSWORD_PEPPER`
    pub fn from_env() -> AuthResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AuthResult<Self> {
        let mut config = Self::default();

        if let Some(secs) = lookup("AUTH_SESSION_TTL_SECS") {
            config.session_ttl = Duration::from_secs(parse_secs("AUTH_SESSION_TTL_SECS", &secs)?);
        }
        if let Some(secs) = lookup("AUTH_STORE_TIMEOUT_SECS") {
            config.store_timeout =
                Duration::from_secs(parse_secs("AUTH_STORE_TIMEOUT_SECS", &secs)?);
        }
        if let Some(scheme) = lookup("AUTH_PASSWORD_SCHEME") {
            config.password_scheme = match scheme.trim() {
                "argon2id" => PasswordScheme::default(),
                "legacy-sha256" => PasswordScheme::LegacySha256,
                other => {
                    return Err(AuthError::InvalidInput(format!(
                        "AUTH_PASSWORD_SCHEME must be 'argon2id' or 'legacy-sha256', got '{other}'"
                    )));
                }
            };
        }
        if let Some(pepper) = lookup("AUTH_PASSWORD_PEPPER").filter(|p| !p.is_empty()) {
            config.password_pepper = Some(pepper.into_bytes());
        }

        Ok(config)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Build the configured password hasher
    pub fn build_hasher(&self) -> AuthResult<Arc<dyn PasswordHasher>> {
        match &self.password_scheme {
            PasswordScheme::Argon2id {
                memory_kib,
                iterations,
                parallelism,
            } => {
                let hasher = Argon2Hasher::new(
                    *memory_kib,
                    *iterations,
                    *parallelism,
                    self.password_pepper.clone(),
                )?;
                Ok(Arc::new(hasher))
            }
            PasswordScheme::LegacySha256 => {
                if self.password_pepper.is_some() {
                    tracing::warn!("Password pepper is ignored by the legacy SHA-256 scheme");
                }
                Ok(Arc::new(Sha256Hasher))
            }
        }
    }
}

fn parse_secs(key: &str, value: &str) -> AuthResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| AuthError::InvalidInput(format!("{key} must be a whole number of seconds")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
        assert_eq!(config.store_timeout, Duration::from_secs(5));
        assert_eq!(config.token_bytes, 32);
        assert_eq!(config.token_issue_attempts, 3);
        assert!(matches!(config.password_scheme, PasswordScheme::Argon2id { .. }));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AuthConfig::from_lookup(lookup(&[
            ("AUTH_SESSION_TTL_SECS", "60"),
            ("AUTH_STORE_TIMEOUT_SECS", " 2 "),
            ("AUTH_PASSWORD_SCHEME", "legacy-sha256"),
            ("AUTH_PASSWORD_PEPPER", "pepper"),
        ]))
        .unwrap();

        assert_eq!(config.session_ttl, Duration::from_secs(60));
        assert_eq!(config.store_timeout, Duration::from_secs(2));
        assert_eq!(config.password_scheme, PasswordScheme::LegacySha256);
        assert_eq!(config.pepper(), Some(&b"pepper"[..]));
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = AuthConfig::from_lookup(lookup(&[("AUTH_SESSION_TTL_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));

        let err = AuthConfig::from_lookup(lookup(&[("AUTH_PASSWORD_SCHEME", "md5")]))
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }

    #[test]
    fn test_debug_redacts_pepper() {
        let config = AuthConfig {
            password_pepper: Some(b"s3cr3t".to_vec()),
            ..AuthConfig::development()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_build_hasher_rejects_bad_parameters() {
        let config = AuthConfig {
            password_scheme: PasswordScheme::Argon2id {
                memory_kib: 1,
                iterations: 1,
                parallelism: 1,
            },
            ..AuthConfig::default()
        };
        assert!(matches!(config.build_hasher(), Err(AuthError::Internal(_))));
    }
}
