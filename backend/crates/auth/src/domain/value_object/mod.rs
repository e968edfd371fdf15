//! Value Object Module

pub mod ability;
pub mod email;
pub mod user_id;
pub mod user_name;
pub mod user_password;
pub mod user_role;
