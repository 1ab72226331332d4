//! Password Hashing and Verification
//!
//! Two schemes share the [`PasswordHasher`] trait:
//! - [`Argon2Hasher`]: Argon2id, random salt, PHC string output (default)
//! - [`Sha256Hasher`]: unsalted SHA-256 hex digest, a deterministic
//!   fast-digest mode with no salt or work factor
//!
//! Plaintext is carried in [`ClearTextPassword`], which is zeroized on drop
//! and never printed. No password policy is applied here: any string,
//! including the empty one, can be digested and verified.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::{constant_time_eq, sha256_hex};

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Cost parameters rejected by the algorithm
    #[error("Invalid password hashing parameters: {0}")]
    InvalidParameters(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, PasswordHasher, Sha256Hasher};
///
/// let hasher = Sha256Hasher;
/// let password = ClearTextPassword::new("pw123");
/// let digest = hasher.digest(&password).unwrap();
/// assert!(hasher.verify(&password, &digest));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Password Digest (Safe to store)
// ============================================================================

/// Stored form of a password
///
/// Either a PHC string (`$argon2id$v=19$...`) or a 64-character hex digest,
/// depending on the scheme that produced it. The value is opaque to callers.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest read back from storage
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the digest for storage
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordDigest").field(&"[HASH]").finish()
    }
}

// ============================================================================
// Hashers
// ============================================================================

/// One-way transform of a plaintext credential into a storable digest
///
/// Implementations hold no mutable state and are safe to share across tasks.
pub trait PasswordHasher: Send + Sync {
    /// Produce the digest to store for `password`
    fn digest(&self, password: &ClearTextPassword) -> Result<PasswordDigest, PasswordHashError>;

    /// `true` iff `digest` was produced from `password` by this scheme
    ///
    /// Never panics. A digest of another scheme, or garbage, yields `false`.
    fn verify(&self, password: &ClearTextPassword, digest: &PasswordDigest) -> bool;
}

/// Argon2id hasher
///
/// Each digest embeds its own random 128-bit salt, so hashing the same
/// password twice yields different strings that both verify.
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
    pepper: Option<Vec<u8>>,
}

impl Argon2Hasher {
    /// Build a hasher with explicit cost parameters
    ///
    /// ## Arguments
    /// * `memory_kib` - memory cost in KiB (at least `8 * parallelism`)
    /// * `iterations` - time cost
    /// * `parallelism` - lanes
    /// * `pepper` - optional application-wide secret appended to every password
    pub fn new(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
        pepper: Option<Vec<u8>>,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordHashError::InvalidParameters(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            pepper,
        })
    }

    /// Password bytes with the pepper appended, wiped on drop
    fn peppered(&self, password: &ClearTextPassword) -> Zeroizing<Vec<u8>> {
        let mut combined = Zeroizing::new(password.as_bytes().to_vec());
        if let Some(p) = &self.pepper {
            combined.extend_from_slice(p);
        }
        combined
    }
}

impl Default for Argon2Hasher {
    /// OWASP recommended parameters: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
            pepper: None,
        }
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn digest(&self, password: &ClearTextPassword) -> Result<PasswordDigest, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let bytes = self.peppered(password);

        let hash = self
            .argon2
            .hash_password(&bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(PasswordDigest(hash.to_string()))
    }

    fn verify(&self, password: &ClearTextPassword, digest: &PasswordDigest) -> bool {
        let parsed = match PasswordHash::new(digest.as_str()) {
            Ok(h) => h,
            Err(_) => return false,
        };

        // Argon2 uses constant-time comparison internally
        self.argon2
            .verify_password(&self.peppered(password), &parsed)
            .is_ok()
    }
}

/// Legacy unsalted SHA-256 hasher
///
/// Deterministic fast-digest mode: equal passwords yield equal digests.
/// Digests from other fast hashes (MD5 and the like) do not verify here.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl PasswordHasher for Sha256Hasher {
    fn digest(&self, password: &ClearTextPassword) -> Result<PasswordDigest, PasswordHashError> {
        Ok(PasswordDigest(sha256_hex(password.as_bytes())))
    }

    fn verify(&self, password: &ClearTextPassword, digest: &PasswordDigest) -> bool {
        let candidate = sha256_hex(password.as_bytes());
        constant_time_eq(candidate.as_bytes(), digest.as_str().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_argon2(pepper: Option<&[u8]>) -> Argon2Hasher {
        Argon2Hasher::new(8, 1, 1, pepper.map(<[u8]>::to_vec)).unwrap()
    }

    fn hashers() -> Vec<Box<dyn PasswordHasher>> {
        vec![Box::new(cheap_argon2(None)), Box::new(Sha256Hasher)]
    }

    #[test]
    fn test_hash_and_verify() {
        for hasher in hashers() {
            let password = ClearTextPassword::new("pw123");
            let digest = hasher.digest(&password).unwrap();
            assert!(hasher.verify(&password, &digest));
            assert!(!hasher.verify(&ClearTextPassword::new("pw124"), &digest));
        }
    }

    #[test]
    fn test_empty_and_unicode_passwords() {
        for hasher in hashers() {
            for raw in ["", " ", "pässwörd", "パスワード"] {
                let password = ClearTextPassword::new(raw);
                let digest = hasher.digest(&password).unwrap();
                assert!(hasher.verify(&password, &digest));
            }
        }
    }

    #[test]
    fn test_distinct_passwords_give_distinct_digests() {
        for hasher in hashers() {
            let a = hasher.digest(&ClearTextPassword::new("alpha")).unwrap();
            let b = hasher.digest(&ClearTextPassword::new("Alpha")).unwrap();
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_argon2_salts_differ() {
        let hasher = cheap_argon2(None);
        let password = ClearTextPassword::new("same");
        let a = hasher.digest(&password).unwrap();
        let b = hasher.digest(&password).unwrap();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify(&password, &a));
        assert!(hasher.verify(&password, &b));
    }

    #[test]
    fn test_sha256_is_deterministic_hex() {
        let password = ClearTextPassword::new("hello");
        let digest = Sha256Hasher.digest(&password).unwrap();
        assert_eq!(
            digest.as_str(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(digest, Sha256Hasher.digest(&password).unwrap());
    }

    #[test]
    fn test_hash_with_pepper() {
        let peppered = cheap_argon2(Some(b"pepper"));
        let password = ClearTextPassword::new("pw123");
        let digest = peppered.digest(&password).unwrap();

        assert!(peppered.verify(&password, &digest));
        assert!(!cheap_argon2(None).verify(&password, &digest));
        assert!(!cheap_argon2(Some(b"other")).verify(&password, &digest));
    }

    #[test]
    fn test_md5_digest_is_not_accepted() {
        // MD5("hello")
        let md5 = PasswordDigest::from_stored("5d41402abc4b2a76b9719d911017c592");
        assert!(!Sha256Hasher.verify(&ClearTextPassword::new("hello"), &md5));
    }

    #[test]
    fn test_foreign_or_garbage_digest_is_rejected() {
        let password = ClearTextPassword::new("pw123");
        let argon = cheap_argon2(None);

        let legacy = Sha256Hasher.digest(&password).unwrap();
        assert!(!argon.verify(&password, &legacy));

        let modern = argon.digest(&password).unwrap();
        assert!(!Sha256Hasher.verify(&password, &modern));

        let garbage = PasswordDigest::from_stored("not a digest");
        assert!(!argon.verify(&password, &garbage));
        assert!(!Sha256Hasher.verify(&password, &garbage));
    }

    #[test]
    fn test_invalid_parameters() {
        let err = Argon2Hasher::new(1, 1, 1, None).unwrap_err();
        assert!(matches!(err, PasswordHashError::InvalidParameters(_)));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("secret123");
        let debug = format!("{:?}", password);
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("REDACTED"));

        let digest = Sha256Hasher.digest(&password).unwrap();
        assert!(!format!("{:?}", digest).contains(digest.as_str()));

        let hasher = cheap_argon2(Some(b"s3cr3t-pepper"));
        let debug = format!("{:?}", hasher);
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("REDACTED"));
    }
}
