//! Value Object Module

pub mod geo;
pub mod incident_status;
pub mod message_kind;
pub mod pagination;
pub mod severity;
pub mod sos_status;
