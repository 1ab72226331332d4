//! Infrastructure Layer
//!
//! Repository implementations.

pub mod memory;
pub mod postgres;

pub use memory::MemoryQuizRepository;
pub use postgres::PgQuizRepository;
