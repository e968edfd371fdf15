//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{alert::Alert, incident::Incident, message::Message, sos_alert::SosAlert};
pub use repository::{
    AlertRepository, IncidentRepository, MessageRecord, MessageRepository, MessageStats,
    SosRepository,
};
pub use value_object::pagination::{Page, PageRequest};
