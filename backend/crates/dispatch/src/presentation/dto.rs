//! API DTOs (Data Transfer Objects)
//!
//! Wire format is snake_case JSON; enums travel as their storage codes.

use auth::models::ability::Ability;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{alert::Alert, incident::Incident, sos_alert::SosAlert};
use crate::domain::repository::{MessageRecord, MessageStats};
use crate::domain::value_object::{
    incident_status::IncidentStatus, message_kind::MessageKind, pagination::Page,
    severity::AlertSeverity, sos_status::SosStatus,
};

// ============================================================================
// Shared Query Parameters
// ============================================================================

/// Pagination query (`?page=&page_size=`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Admin incident list query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminIncidentQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub status_filter: Option<String>,
}

/// Admin message list query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminMessageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub message_type: Option<String>,
    pub is_read: Option<bool>,
}

// ============================================================================
// Incidents
// ============================================================================

/// Create incident request
#[derive(Debug, Clone, Deserialize)]
pub struct IncidentCreateRequest {
    #[serde(rename = "type")]
    pub incident_type: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub image_url: Option<String>,
}

/// Admin incident update request
#[derive(Debug, Clone, Deserialize)]
pub struct IncidentUpdateRequest {
    pub status: Option<String>,
    pub risk_score: Option<f64>,
    pub risk_level: Option<String>,
}

/// Incident response
#[derive(Debug, Clone, Serialize)]
pub struct IncidentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub incident_type: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub status: IncidentStatus,
    pub image_url: Option<String>,
    pub risk_score: Option<f64>,
    pub risk_level: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Incident> for IncidentResponse {
    fn from(incident: Incident) -> Self {
        Self {
            id: incident.incident_id.into_uuid(),
            user_id: incident.user_id.into_uuid(),
            incident_type: incident.incident_type,
            description: incident.description,
            lat: incident.coordinates.lat(),
            lng: incident.coordinates.lng(),
            status: incident.status,
            image_url: incident.image_url,
            risk_score: incident.risk_score,
            risk_level: incident.risk_level,
            created_at: incident.created_at,
        }
    }
}

/// Paginated incident list
#[derive(Debug, Clone, Serialize)]
pub struct IncidentListResponse {
    pub incidents: Vec<IncidentResponse>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

impl From<Page<Incident>> for IncidentListResponse {
    fn from(page: Page<Incident>) -> Self {
        let mapped = page.map(IncidentResponse::from);
        Self {
            incidents: mapped.items,
            total: mapped.total,
            page: mapped.page,
            page_size: mapped.page_size,
        }
    }
}

// ============================================================================
// SOS
// ============================================================================

/// Create SOS request
#[derive(Debug, Clone, Deserialize)]
pub struct SosCreateRequest {
    pub ability: Ability,
    pub lat: f64,
    pub lng: f64,
    pub battery: i16,
    pub status: SosStatus,
}

/// SOS response
#[derive(Debug, Clone, Serialize)]
pub struct SosResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub ability: Ability,
    pub lat: f64,
    pub lng: f64,
    pub battery: i16,
    pub status: SosStatus,
    pub created_at: DateTime<Utc>,
}

impl From<SosAlert> for SosResponse {
    fn from(alert: SosAlert) -> Self {
        Self {
            id: alert.sos_id.into_uuid(),
            user_id: alert.user_id.into_uuid(),
            ability: alert.ability,
            lat: alert.coordinates.lat(),
            lng: alert.coordinates.lng(),
            battery: alert.battery.percent(),
            status: alert.status,
            created_at: alert.created_at,
        }
    }
}

/// Paginated SOS list
#[derive(Debug, Clone, Serialize)]
pub struct SosListResponse {
    pub sos_alerts: Vec<SosResponse>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

impl From<Page<SosAlert>> for SosListResponse {
    fn from(page: Page<SosAlert>) -> Self {
        let mapped = page.map(SosResponse::from);
        Self {
            sos_alerts: mapped.items,
            total: mapped.total,
            page: mapped.page,
            page_size: mapped.page_size,
        }
    }
}

// ============================================================================
// Alerts
// ============================================================================

/// Create disaster alert request (admin)
#[derive(Debug, Clone, Deserialize)]
pub struct AlertCreateRequest {
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
}

/// Disaster alert response
#[derive(Debug, Clone, Serialize)]
pub struct AlertResponse {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub created_at: DateTime<Utc>,
}

impl From<Alert> for AlertResponse {
    fn from(alert: Alert) -> Self {
        Self {
            id: alert.alert_id.into_uuid(),
            title: alert.title,
            message: alert.message,
            severity: alert.severity,
            created_at: alert.created_at,
        }
    }
}

/// Paginated alert list
#[derive(Debug, Clone, Serialize)]
pub struct AlertListResponse {
    pub alerts: Vec<AlertResponse>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

impl From<Page<Alert>> for AlertListResponse {
    fn from(page: Page<Alert>) -> Self {
        let mapped = page.map(AlertResponse::from);
        Self {
            alerts: mapped.items,
            total: mapped.total,
            page: mapped.page,
            page_size: mapped.page_size,
        }
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Create message request (any kind)
#[derive(Debug, Clone, Deserialize)]
pub struct MessageCreateRequest {
    pub message_type: MessageKind,
    pub title: String,
    pub content: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category: Option<String>,
    pub severity: Option<String>,
    pub ability: Option<Ability>,
    pub battery: Option<i16>,
}

/// Create SOS message request
#[derive(Debug, Clone, Deserialize)]
pub struct SosMessageRequest {
    pub content: String,
    pub ability: Ability,
    pub lat: f64,
    pub lng: f64,
    pub battery: i16,
}

/// Create incident message request
#[derive(Debug, Clone, Deserialize)]
pub struct IncidentMessageRequest {
    pub content: String,
    pub category: String,
    pub severity: String,
    pub lat: f64,
    pub lng: f64,
}

/// Message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: Option<String>,
    pub message_type: MessageKind,
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

impl From<MessageRecord> for MessageResponse {
    fn from(record: MessageRecord) -> Self {
        let message = record.message;
        Self {
            id: message.message_id.into_uuid(),
            user_id: message.user_id.into_uuid(),
            user_name: record.user_name,
            message_type: message.kind,
            title: message.title,
            content: message.content,
            lat: message.lat,
            lng: message.lng,
            category: message.category,
            severity: message.severity,
            ability: message.ability,
            battery: message.battery,
            is_read: message.is_read,
            created_at: message.created_at,
        }
    }
}

/// Paginated message list
#[derive(Debug, Clone, Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageResponse>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

impl From<Page<MessageRecord>> for MessageListResponse {
    fn from(page: Page<MessageRecord>) -> Self {
        let mapped = page.map(MessageResponse::from);
        Self {
            messages: mapped.items,
            total: mapped.total,
            page: mapped.page,
            page_size: mapped.page_size,
        }
    }
}

/// Admin dashboard counters
#[derive(Debug, Clone, Serialize)]
pub struct MessageStatsResponse {
    pub total: i64,
    pub unread: i64,
    pub read: i64,
    pub by_type: MessageStatsByType,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageStatsByType {
    #[serde(rename = "SOS")]
    pub sos: i64,
    #[serde(rename = "INCIDENT")]
    pub incident: i64,
    #[serde(rename = "GENERAL")]
    pub general: i64,
}

impl From<MessageStats> for MessageStatsResponse {
    fn from(stats: MessageStats) -> Self {
        Self {
            total: stats.total,
            unread: stats.unread,
            read: stats.read(),
            by_type: MessageStatsByType {
                sos: stats.sos,
                incident: stats.incident,
                general: stats.general,
            },
        }
    }
}

/// Unread counter for the admin badge
#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}
