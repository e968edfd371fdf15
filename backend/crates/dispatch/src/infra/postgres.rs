//! PostgreSQL Repository Implementations
//!
//! One repository struct backs all four dispatch traits; every table is
//! read newest first with a separate COUNT for the paging envelope.

use auth::models::ability::Ability;
use chrono::{DateTime, Utc};
use kernel::id::{AlertId, IncidentId, MessageId, SosAlertId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{alert::Alert, incident::Incident, message::Message, sos_alert::SosAlert};
use crate::domain::repository::{
    AlertRepository, IncidentRepository, MessageRecord, MessageRepository, MessageStats,
    SosRepository,
};
use crate::domain::value_object::{
    geo::{BatteryLevel, Coordinates},
    incident_status::IncidentStatus,
    message_kind::MessageKind,
    pagination::{Page, PageRequest},
    severity::AlertSeverity,
    sos_status::SosStatus,
};
use crate::error::{DispatchError, DispatchResult};

/// PostgreSQL-backed dispatch repository
#[derive(Clone)]
pub struct PgDispatchRepository {
    pool: PgPool,
}

impl PgDispatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn bad_code(entity: &str, code: &str) -> DispatchError {
    DispatchError::Internal(format!("Unknown {entity} code: {code}"))
}

// ============================================================================
// Incident Repository Implementation
// ============================================================================

impl IncidentRepository for PgDispatchRepository {
    async fn create(&self, incident: &Incident) -> DispatchResult<()> {
        sqlx::query(
            r#"
            INSERT INTO incidents (
                incident_id, user_id, incident_type, description,
                lat, lng, status, image_url, risk_score, risk_level, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(incident.incident_id.as_uuid())
        .bind(incident.user_id.as_uuid())
        .bind(&incident.incident_type)
        .bind(&incident.description)
        .bind(incident.coordinates.lat())
        .bind(incident.coordinates.lng())
        .bind(incident.status.code())
        .bind(&incident.image_url)
        .bind(incident.risk_score)
        .bind(&incident.risk_level)
        .bind(incident.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, incident_id: &IncidentId) -> DispatchResult<Option<Incident>> {
        let row = sqlx::query_as::<_, IncidentRow>(
            "SELECT * FROM incidents WHERE incident_id = $1",
        )
        .bind(incident_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_incident()).transpose()
    }

    async fn find_owned(
        &self,
        incident_id: &IncidentId,
        owner: &UserId,
    ) -> DispatchResult<Option<Incident>> {
        let row = sqlx::query_as::<_, IncidentRow>(
            "SELECT * FROM incidents WHERE incident_id = $1 AND user_id = $2",
        )
        .bind(incident_id.as_uuid())
        .bind(owner.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_incident()).transpose()
    }

    async fn list_for_user(
        &self,
        owner: &UserId,
        page: &PageRequest,
    ) -> DispatchResult<Page<Incident>> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM incidents WHERE user_id = $1",
        )
        .bind(owner.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, IncidentRow>(
            r#"
            SELECT * FROM incidents
            WHERE user_id = $1
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(owner.as_uuid())
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|r| r.into_incident())
            .collect::<DispatchResult<Vec<_>>>()?;

        Ok(Page::new(items, total, page))
    }

    async fn list_all(
        &self,
        status: Option<IncidentStatus>,
        page: &PageRequest,
    ) -> DispatchResult<Page<Incident>> {
        let status_code = status.map(|s| s.code());

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM incidents WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status_code)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, IncidentRow>(
            r#"
            SELECT * FROM incidents
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(status_code)
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|r| r.into_incident())
            .collect::<DispatchResult<Vec<_>>>()?;

        Ok(Page::new(items, total, page))
    }

    async fn update(&self, incident: &Incident) -> DispatchResult<()> {
        sqlx::query(
            r#"
            UPDATE incidents
            SET status = $2, risk_score = $3, risk_level = $4
            WHERE incident_id = $1
            "#,
        )
        .bind(incident.incident_id.as_uuid())
        .bind(incident.status.code())
        .bind(incident.risk_score)
        .bind(&incident.risk_level)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// SOS Repository Implementation
// ============================================================================

impl SosRepository for PgDispatchRepository {
    async fn create(&self, alert: &SosAlert) -> DispatchResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sos_alerts (
                sos_id, user_id, ability, lat, lng, battery, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(alert.sos_id.as_uuid())
        .bind(alert.user_id.as_uuid())
        .bind(alert.ability.code())
        .bind(alert.coordinates.lat())
        .bind(alert.coordinates.lng())
        .bind(alert.battery.percent())
        .bind(alert.status.code())
        .bind(alert.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_for_user(
        &self,
        owner: &UserId,
        page: &PageRequest,
    ) -> DispatchResult<Page<SosAlert>> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sos_alerts WHERE user_id = $1",
        )
        .bind(owner.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, SosRow>(
            r#"
            SELECT * FROM sos_alerts
            WHERE user_id = $1
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(owner.as_uuid())
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|r| r.into_sos_alert())
            .collect::<DispatchResult<Vec<_>>>()?;

        Ok(Page::new(items, total, page))
    }
}

// ============================================================================
// Alert Repository Implementation
// ============================================================================

impl AlertRepository for PgDispatchRepository {
    async fn create(&self, alert: &Alert) -> DispatchResult<()> {
        sqlx::query(
            r#"
            INSERT INTO alerts (alert_id, title, message, severity, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(alert.alert_id.as_uuid())
        .bind(&alert.title)
        .bind(&alert.message)
        .bind(alert.severity.code())
        .bind(alert.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, page: &PageRequest) -> DispatchResult<Page<Alert>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM alerts")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, AlertRow>(
            "SELECT * FROM alerts ORDER BY created_at DESC OFFSET $1 LIMIT $2",
        )
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|r| r.into_alert())
            .collect::<DispatchResult<Vec<_>>>()?;

        Ok(Page::new(items, total, page))
    }
}

// ============================================================================
// Message Repository Implementation
// ============================================================================

impl MessageRepository for PgDispatchRepository {
    async fn create(&self, message: &Message) -> DispatchResult<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (
                message_id, user_id, message_type, title, content,
                lat, lng, category, severity, ability, battery, is_read, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(message.message_id.as_uuid())
        .bind(message.user_id.as_uuid())
        .bind(message.kind.code())
        .bind(&message.title)
        .bind(&message.content)
        .bind(message.lat)
        .bind(message.lng)
        .bind(&message.category)
        .bind(&message.severity)
        .bind(message.ability.map(|a| a.code()))
        .bind(message.battery)
        .bind(message.is_read)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, message_id: &MessageId) -> DispatchResult<Option<MessageRecord>> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT m.*, u.name AS user_name
            FROM messages m
            LEFT JOIN users u ON u.user_id = m.user_id
            WHERE m.message_id = $1
            "#,
        )
        .bind(message_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_record()).transpose()
    }

    async fn list_for_user(
        &self,
        owner: &UserId,
        page: &PageRequest,
    ) -> DispatchResult<Page<MessageRecord>> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM messages WHERE user_id = $1",
        )
        .bind(owner.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT m.*, u.name AS user_name
            FROM messages m
            LEFT JOIN users u ON u.user_id = m.user_id
            WHERE m.user_id = $1
            ORDER BY m.created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(owner.as_uuid())
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|r| r.into_record())
            .collect::<DispatchResult<Vec<_>>>()?;

        Ok(Page::new(items, total, page))
    }

    async fn list_all(
        &self,
        kind: Option<MessageKind>,
        is_read: Option<bool>,
        page: &PageRequest,
    ) -> DispatchResult<Page<MessageRecord>> {
        let kind_code = kind.map(|k| k.code());

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM messages
            WHERE ($1::text IS NULL OR message_type = $1)
              AND ($2::boolean IS NULL OR is_read = $2)
            "#,
        )
        .bind(kind_code)
        .bind(is_read)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT m.*, u.name AS user_name
            FROM messages m
            LEFT JOIN users u ON u.user_id = m.user_id
            WHERE ($1::text IS NULL OR m.message_type = $1)
              AND ($2::boolean IS NULL OR m.is_read = $2)
            ORDER BY m.created_at DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(kind_code)
        .bind(is_read)
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|r| r.into_record())
            .collect::<DispatchResult<Vec<_>>>()?;

        Ok(Page::new(items, total, page))
    }

    async fn mark_read(&self, message_id: &MessageId) -> DispatchResult<()> {
        sqlx::query("UPDATE messages SET is_read = TRUE WHERE message_id = $1")
            .bind(message_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn stats(&self) -> DispatchResult<MessageStats> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE NOT is_read) AS unread,
                COUNT(*) FILTER (WHERE message_type = 'SOS') AS sos,
                COUNT(*) FILTER (WHERE message_type = 'INCIDENT') AS incident,
                COUNT(*) FILTER (WHERE message_type = 'GENERAL') AS general
            FROM messages
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(MessageStats {
            total: row.total,
            unread: row.unread,
            sos: row.sos,
            incident: row.incident,
            general: row.general,
        })
    }

    async fn unread_count(&self) -> DispatchResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM messages WHERE NOT is_read",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct IncidentRow {
    incident_id: Uuid,
    user_id: Uuid,
    incident_type: String,
    description: String,
    lat: f64,
    lng: f64,
    status: String,
    image_url: Option<String>,
    risk_score: Option<f64>,
    risk_level: Option<String>,
    created_at: DateTime<Utc>,
}

impl IncidentRow {
    fn into_incident(self) -> DispatchResult<Incident> {
        let status = IncidentStatus::from_code(&self.status)
            .ok_or_else(|| bad_code("status", &self.status))?;

        Ok(Incident {
            incident_id: IncidentId::from_uuid(self.incident_id),
            user_id: UserId::from_uuid(self.user_id),
            incident_type: self.incident_type,
            description: self.description,
            coordinates: Coordinates::new(self.lat, self.lng)?,
            status,
            image_url: self.image_url,
            risk_score: self.risk_score,
            risk_level: self.risk_level,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SosRow {
    sos_id: Uuid,
    user_id: Uuid,
    ability: String,
    lat: f64,
    lng: f64,
    battery: i16,
    status: String,
    created_at: DateTime<Utc>,
}

impl SosRow {
    fn into_sos_alert(self) -> DispatchResult<SosAlert> {
        let ability = Ability::from_code(&self.ability)
            .ok_or_else(|| bad_code("ability", &self.ability))?;
        let status =
            SosStatus::from_code(&self.status).ok_or_else(|| bad_code("status", &self.status))?;

        Ok(SosAlert {
            sos_id: SosAlertId::from_uuid(self.sos_id),
            user_id: UserId::from_uuid(self.user_id),
            ability,
            coordinates: Coordinates::new(self.lat, self.lng)?,
            battery: BatteryLevel::new(self.battery)?,
            status,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AlertRow {
    alert_id: Uuid,
    title: String,
    message: String,
    severity: String,
    created_at: DateTime<Utc>,
}

impl AlertRow {
    fn into_alert(self) -> DispatchResult<Alert> {
        let severity = AlertSeverity::from_code(&self.severity)
            .ok_or_else(|| bad_code("severity", &self.severity))?;

        Ok(Alert {
            alert_id: AlertId::from_uuid(self.alert_id),
            title: self.title,
            message: self.message,
            severity,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    message_id: Uuid,
    user_id: Uuid,
    message_type: String,
    title: String,
    content: String,
    lat: Option<f64>,
    lng: Option<f64>,
    category: Option<String>,
    severity: Option<String>,
    ability: Option<String>,
    battery: Option<i16>,
    is_read: bool,
    created_at: DateTime<Utc>,
    user_name: Option<String>,
}

impl MessageRow {
    fn into_record(self) -> DispatchResult<MessageRecord> {
        let kind = MessageKind::from_code(&self.message_type)
            .ok_or_else(|| bad_code("message type", &self.message_type))?;
        let ability = self
            .ability
            .as_deref()
            .map(|code| Ability::from_code(code).ok_or_else(|| bad_code("ability", code)))
            .transpose()?;

        Ok(MessageRecord {
            message: Message {
                message_id: MessageId::from_uuid(self.message_id),
                user_id: UserId::from_uuid(self.user_id),
                kind,
                title: self.title,
                content: self.content,
                lat: self.lat,
                lng: self.lng,
                category: self.category,
                severity: self.severity,
                ability,
                battery: self.battery,
                is_read: self.is_read,
                created_at: self.created_at,
            },
            user_name: self.user_name,
        })
    }
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    total: i64,
    unread: i64,
    sos: i64,
    incident: i64,
    general: i64,
}
