//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (CSPRNG tokens, SHA-256, constant-time compare)
//! - Password hashing (Argon2id by default, legacy unsalted SHA-256 on request)
//! - Deadlines for store calls

pub mod crypto;
pub mod deadline;
pub mod password;
