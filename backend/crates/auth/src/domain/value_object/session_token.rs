//! Session Token Value Object
//!
//! Opaque bearer token handed to the client on login. Only its SHA-256
//! digest is persisted, so a leaked sessions table cannot be replayed.

use std::fmt;

use platform::crypto::{random_token, sha256_hex};

/// Upper bound on accepted token length; anything longer is malformed
const MAX_TOKEN_LENGTH: usize = 256;

/// Bearer session token
///
/// Debug output is redacted. Use [`SessionToken::as_str`] to hand the token
/// to the client.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Draw a fresh token from `bytes` bytes of OS randomness
    pub fn generate(bytes: usize) -> Self {
        Self(random_token(bytes))
    }

    /// Accept a client-supplied token if it is shaped like one we issue
    ///
    /// Returns `None` for empty, oversized, or non-base64url input.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_TOKEN_LENGTH
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        valid.then(|| Self(raw.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage key: lowercase hex SHA-256 of the token
    pub fn storage_key(&self) -> String {
        sha256_hex(self.0.as_bytes())
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let token = SessionToken::generate(32);
        assert_eq!(token.as_str().len(), 43);
        assert_eq!(SessionToken::parse(token.as_str()), Some(token));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(SessionToken::parse(""), None);
        assert_eq!(SessionToken::parse("has space"), None);
        assert_eq!(SessionToken::parse("pad=="), None);
        assert_eq!(SessionToken::parse(&"a".repeat(MAX_TOKEN_LENGTH + 1)), None);
    }

    #[test]
    fn test_storage_key_is_stable_hex() {
        let token = SessionToken::parse("abc").unwrap();
        assert_eq!(token.storage_key(), token.storage_key());
        assert_eq!(token.storage_key().len(), 64);
        assert_ne!(token.storage_key(), token.as_str());
    }

    #[test]
    fn test_debug_redaction() {
        let token = SessionToken::generate(32);
        assert!(!format!("{:?}", token).contains(token.as_str()));
    }
}
