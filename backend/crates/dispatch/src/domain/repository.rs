//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{IncidentId, MessageId, UserId};

use crate::domain::entity::{alert::Alert, incident::Incident, message::Message, sos_alert::SosAlert};
use crate::domain::value_object::{
    incident_status::IncidentStatus,
    message_kind::MessageKind,
    pagination::{Page, PageRequest},
};
use crate::error::DispatchResult;

/// Message joined with its sender's display name
#[derive(Debug, Clone)]
pub struct MessageRecord {
    pub message: Message,
    pub user_name: Option<String>,
}

/// Dashboard counters for the admin stats endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageStats {
    pub total: i64,
    pub unread: i64,
    pub sos: i64,
    pub incident: i64,
    pub general: i64,
}

impl MessageStats {
    pub fn read(&self) -> i64 {
        self.total - self.unread
    }
}

/// Incident repository trait
#[trait_variant::make(IncidentRepository: Send)]
pub trait LocalIncidentRepository {
    async fn create(&self, incident: &Incident) -> DispatchResult<()>;

    /// Find an incident regardless of owner (admin paths)
    async fn find_by_id(&self, incident_id: &IncidentId) -> DispatchResult<Option<Incident>>;

    /// Find an incident only if `owner` reported it
    async fn find_owned(
        &self,
        incident_id: &IncidentId,
        owner: &UserId,
    ) -> DispatchResult<Option<Incident>>;

    async fn list_for_user(
        &self,
        owner: &UserId,
        page: &PageRequest,
    ) -> DispatchResult<Page<Incident>>;

    async fn list_all(
        &self,
        status: Option<IncidentStatus>,
        page: &PageRequest,
    ) -> DispatchResult<Page<Incident>>;

    /// Persist status / risk field changes
    async fn update(&self, incident: &Incident) -> DispatchResult<()>;
}

/// SOS repository trait
#[trait_variant::make(SosRepository: Send)]
pub trait LocalSosRepository {
    async fn create(&self, alert: &SosAlert) -> DispatchResult<()>;

    async fn list_for_user(
        &self,
        owner: &UserId,
        page: &PageRequest,
    ) -> DispatchResult<Page<SosAlert>>;
}

/// Disaster alert repository trait
#[trait_variant::make(AlertRepository: Send)]
pub trait LocalAlertRepository {
    async fn create(&self, alert: &Alert) -> DispatchResult<()>;

    async fn list(&self, page: &PageRequest) -> DispatchResult<Page<Alert>>;
}

/// Message repository trait
#[trait_variant::make(MessageRepository: Send)]
pub trait LocalMessageRepository {
    async fn create(&self, message: &Message) -> DispatchResult<()>;

    async fn find_by_id(&self, message_id: &MessageId) -> DispatchResult<Option<MessageRecord>>;

    async fn list_for_user(
        &self,
        owner: &UserId,
        page: &PageRequest,
    ) -> DispatchResult<Page<MessageRecord>>;

    async fn list_all(
        &self,
        kind: Option<MessageKind>,
        is_read: Option<bool>,
        page: &PageRequest,
    ) -> DispatchResult<Page<MessageRecord>>;

    async fn mark_read(&self, message_id: &MessageId) -> DispatchResult<()>;

    async fn stats(&self) -> DispatchResult<MessageStats>;

    async fn unread_count(&self) -> DispatchResult<i64>;
}
