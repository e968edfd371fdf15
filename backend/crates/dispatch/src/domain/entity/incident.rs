//! Incident Entity
//!
//! A citizen-reported incident. Risk score and level are persisted
//! pass-through fields set by admins; no automated scoring happens here.

use chrono::{DateTime, Utc};
use kernel::id::{IncidentId, UserId};

use crate::domain::value_object::{geo::Coordinates, incident_status::IncidentStatus};

/// Incident report entity
#[derive(Debug, Clone)]
pub struct Incident {
    pub incident_id: IncidentId,
    /// Reporting user
    pub user_id: UserId,
    /// Free-form category ("fire", "flood", ...)
    pub incident_type: String,
    pub description: String,
    pub coordinates: Coordinates,
    pub status: IncidentStatus,
    pub image_url: Option<String>,
    pub risk_score: Option<f64>,
    pub risk_level: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Incident {
    /// Create a new report; every report starts as `Pending`
    pub fn new(
        user_id: UserId,
        incident_type: String,
        description: String,
        coordinates: Coordinates,
        image_url: Option<String>,
    ) -> Self {
        Self {
            incident_id: IncidentId::new(),
            user_id,
            incident_type,
            description,
            coordinates,
            status: IncidentStatus::Pending,
            image_url,
            risk_score: None,
            risk_level: None,
            created_at: Utc::now(),
        }
    }
}
