//! Message Entity
//!
//! Dashboard message feeding the dispatcher views. The optional fields
//! depend on the kind: SOS messages carry ability/battery, incident
//! messages carry category/severity, general messages carry neither.

use auth::models::ability::Ability;
use chrono::{DateTime, Utc};
use kernel::id::{MessageId, UserId};

use crate::domain::value_object::message_kind::MessageKind;

/// Dashboard message entity
#[derive(Debug, Clone)]
pub struct Message {
    pub message_id: MessageId,
    /// Sender
    pub user_id: UserId,
    pub kind: MessageKind,
    pub title: String,
    pub content: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category: Option<String>,
    pub severity: Option<String>,
    pub ability: Option<Ability>,
    pub battery: Option<i16>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create an unread message
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        kind: MessageKind,
        title: String,
        content: String,
        lat: Option<f64>,
        lng: Option<f64>,
        category: Option<String>,
        severity: Option<String>,
        ability: Option<Ability>,
        battery: Option<i16>,
    ) -> Self {
        Self {
            message_id: MessageId::new(),
            user_id,
            kind,
            title,
            content,
            lat,
            lng,
            category,
            severity,
            ability,
            battery,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
