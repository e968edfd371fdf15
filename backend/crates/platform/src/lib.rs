//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations below the domain crates:
//! - Password hashing (Argon2id, constant-time verification)
//!
//! Nothing in here touches the database or the network; everything is
//! independently unit-testable.

pub mod password;
