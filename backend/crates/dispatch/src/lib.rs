//! Dispatch (Emergency Reporting) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases per sub-domain
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Incident reports with a moderation status lifecycle
//! - One-tap SOS alerts with location, battery and accessibility context
//! - Admin-broadcast disaster alerts
//! - Dashboard messages with read tracking and admin statistics

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{DispatchError, DispatchResult};
pub use infra::postgres::PgDispatchRepository;
pub use presentation::router::dispatch_router;

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgDispatchRepository as DispatchStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
