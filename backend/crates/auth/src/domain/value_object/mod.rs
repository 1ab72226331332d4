//! Value Object Module

pub mod display_name;
pub mod session_token;
pub mod user_name;
pub mod user_role;
