//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Typed, store-assigned ID wrappers
//! - Storage failure classification (feature `sqlx`)
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod kind;
    #[cfg(feature = "sqlx")]
    pub mod store;
}
pub mod id;
