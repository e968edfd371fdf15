//! Message Use Cases
//!
//! Dashboard messages with derived titles: SOS and incident messages
//! get a generated title from their context, general messages keep the
//! title the sender wrote.

use std::sync::Arc;

use auth::Principal;
use auth::models::ability::Ability;
use kernel::id::MessageId;

use crate::domain::entity::message::Message;
use crate::domain::repository::{MessageRecord, MessageRepository, MessageStats};
use crate::domain::value_object::{
    geo::{BatteryLevel, Coordinates},
    message_kind::MessageKind,
    pagination::{Page, PageRequest},
};
use crate::error::{DispatchError, DispatchResult};

const MAX_TITLE_LENGTH: usize = 255;
const MAX_CATEGORY_LENGTH: usize = 100;

/// Free-form message input (any kind)
pub struct CreateMessageInput {
    pub kind: MessageKind,
    pub title: String,
    pub content: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category: Option<String>,
    pub severity: Option<String>,
    pub ability: Option<Ability>,
    pub battery: Option<i16>,
}

/// SOS message input (location and battery required)
pub struct SosMessageInput {
    pub content: String,
    pub ability: Ability,
    pub lat: f64,
    pub lng: f64,
    pub battery: i16,
}

/// Incident message input
pub struct IncidentMessageInput {
    pub content: String,
    pub category: String,
    pub severity: String,
    pub lat: f64,
    pub lng: f64,
}

/// Title shown on the dispatcher dashboard for an SOS message
fn sos_title(ability: Option<Ability>) -> String {
    match ability {
        Some(ability) => format!("SOS Alert: {ability}"),
        None => "SOS Alert: Emergency".to_string(),
    }
}

/// Title shown on the dispatcher dashboard for an incident message
fn incident_title(category: Option<&str>) -> String {
    format!("Incident Report: {}", category.unwrap_or("General"))
}

/// Message use cases
pub struct MessagesUseCase<R: MessageRepository> {
    repo: Arc<R>,
}

impl<R: MessageRepository> MessagesUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a message of any kind; SOS and incident kinds override the
    /// provided title with a derived one
    pub async fn create(
        &self,
        principal: &Principal,
        input: CreateMessageInput,
    ) -> DispatchResult<MessageRecord> {
        validate_text(&input.title, "Title", MAX_TITLE_LENGTH)?;
        if input.content.trim().is_empty() {
            return Err(DispatchError::Validation(
                "Content cannot be empty".to_string(),
            ));
        }
        if let (Some(lat), Some(lng)) = (input.lat, input.lng) {
            Coordinates::new(lat, lng)?;
        }
        if let Some(battery) = input.battery {
            BatteryLevel::new(battery)?;
        }

        let title = match input.kind {
            MessageKind::Sos => sos_title(input.ability),
            MessageKind::Incident => incident_title(input.category.as_deref()),
            MessageKind::General => input.title,
        };

        let message = Message::new(
            principal.user_id,
            input.kind,
            title,
            input.content,
            input.lat,
            input.lng,
            input.category,
            input.severity,
            input.ability,
            input.battery,
        );
        self.repo.create(&message).await?;

        Ok(MessageRecord {
            message,
            user_name: Some(principal.name.clone()),
        })
    }

    /// SOS shortcut: derived title, required location and battery
    pub async fn create_sos(
        &self,
        principal: &Principal,
        input: SosMessageInput,
    ) -> DispatchResult<MessageRecord> {
        let coordinates = Coordinates::new(input.lat, input.lng)?;
        let battery = BatteryLevel::new(input.battery)?;
        if input.content.trim().is_empty() {
            return Err(DispatchError::Validation(
                "Content cannot be empty".to_string(),
            ));
        }

        let message = Message::new(
            principal.user_id,
            MessageKind::Sos,
            sos_title(Some(input.ability)),
            input.content,
            Some(coordinates.lat()),
            Some(coordinates.lng()),
            None,
            None,
            Some(input.ability),
            Some(battery.percent()),
        );
        self.repo.create(&message).await?;

        Ok(MessageRecord {
            message,
            user_name: Some(principal.name.clone()),
        })
    }

    /// Incident shortcut: derived title, required category and severity
    pub async fn create_incident(
        &self,
        principal: &Principal,
        input: IncidentMessageInput,
    ) -> DispatchResult<MessageRecord> {
        let coordinates = Coordinates::new(input.lat, input.lng)?;
        validate_text(&input.category, "Category", MAX_CATEGORY_LENGTH)?;
        if input.content.trim().is_empty() || input.severity.trim().is_empty() {
            return Err(DispatchError::Validation(
                "Content and severity cannot be empty".to_string(),
            ));
        }

        let message = Message::new(
            principal.user_id,
            MessageKind::Incident,
            incident_title(Some(&input.category)),
            input.content,
            Some(coordinates.lat()),
            Some(coordinates.lng()),
            Some(input.category),
            Some(input.severity),
            None,
            None,
        );
        self.repo.create(&message).await?;

        Ok(MessageRecord {
            message,
            user_name: Some(principal.name.clone()),
        })
    }

    pub async fn list_for_user(
        &self,
        principal: &Principal,
        page: PageRequest,
    ) -> DispatchResult<Page<MessageRecord>> {
        self.repo.list_for_user(&principal.user_id, &page).await
    }

    /// Owner-scoped single message lookup
    pub async fn get_owned(
        &self,
        principal: &Principal,
        message_id: MessageId,
    ) -> DispatchResult<MessageRecord> {
        let record = self
            .repo
            .find_by_id(&message_id)
            .await?
            .filter(|r| r.message.user_id == principal.user_id)
            .ok_or(DispatchError::NotFound("Message"))?;
        Ok(record)
    }

    /// Mark read: allowed for the sender or an admin. A non-owner,
    /// non-admin caller gets 403 (the message's existence is already
    /// observable to dispatchers, so no 404 masking here).
    pub async fn mark_read(
        &self,
        principal: &Principal,
        message_id: MessageId,
    ) -> DispatchResult<MessageRecord> {
        let record = self
            .repo
            .find_by_id(&message_id)
            .await?
            .ok_or(DispatchError::NotFound("Message"))?;

        if !principal.is_admin() && record.message.user_id != principal.user_id {
            return Err(DispatchError::Forbidden);
        }

        self.repo.mark_read(&message_id).await?;

        let mut record = record;
        record.message.is_read = true;
        Ok(record)
    }

    /// Admin list with optional kind and read-state filters
    pub async fn list_all(
        &self,
        kind_filter: Option<&str>,
        is_read: Option<bool>,
        page: PageRequest,
    ) -> DispatchResult<Page<MessageRecord>> {
        let kind = kind_filter
            .map(|code| {
                MessageKind::from_code(code).ok_or_else(|| {
                    DispatchError::Validation(format!("Invalid message type: {code}"))
                })
            })
            .transpose()?;

        self.repo.list_all(kind, is_read, &page).await
    }

    pub async fn stats(&self) -> DispatchResult<MessageStats> {
        self.repo.stats().await
    }

    pub async fn unread_count(&self) -> DispatchResult<i64> {
        self.repo.unread_count().await
    }
}

fn validate_text(value: &str, field: &str, max: usize) -> DispatchResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() > max {
        return Err(DispatchError::Validation(format!(
            "{field} must be 1 to {max} characters"
        )));
    }
    Ok(())
}
