//! Disaster Alert Entity

use chrono::{DateTime, Utc};
use kernel::id::AlertId;

use crate::domain::value_object::severity::AlertSeverity;

/// Admin-broadcast disaster alert
#[derive(Debug, Clone)]
pub struct Alert {
    pub alert_id: AlertId,
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(title: String, message: String, severity: AlertSeverity) -> Self {
        Self {
            alert_id: AlertId::new(),
            title,
            message,
            severity,
            created_at: Utc::now(),
        }
    }
}
