//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::DispatchAppState;
pub use router::{dispatch_router, dispatch_router_generic};
