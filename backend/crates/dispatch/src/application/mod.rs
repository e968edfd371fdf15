//! Application Layer
//!
//! Use cases per sub-domain.

pub mod alerts;
pub mod incidents;
pub mod messages;
pub mod sos;

// Re-exports
pub use alerts::{AlertsUseCase, CreateAlertInput};
pub use incidents::{CreateIncidentInput, IncidentsUseCase, UpdateIncidentInput};
pub use messages::{CreateMessageInput, IncidentMessageInput, MessagesUseCase, SosMessageInput};
pub use sos::{CreateSosInput, SosUseCase};
