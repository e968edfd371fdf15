//! Entity Module

pub mod alert;
pub mod incident;
pub mod message;
pub mod sos_alert;
