//! Disaster Alert Use Cases

use std::sync::Arc;

use crate::domain::entity::alert::Alert;
use crate::domain::repository::AlertRepository;
use crate::domain::value_object::{
    pagination::{Page, PageRequest},
    severity::AlertSeverity,
};
use crate::error::{DispatchError, DispatchResult};

const MAX_TITLE_LENGTH: usize = 255;

/// Create alert input (admin broadcast)
pub struct CreateAlertInput {
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
}

/// Alert use cases
pub struct AlertsUseCase<R: AlertRepository> {
    repo: Arc<R>,
}

impl<R: AlertRepository> AlertsUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: CreateAlertInput) -> DispatchResult<Alert> {
        let title = input.title.trim().to_string();
        if title.is_empty() || title.len() > MAX_TITLE_LENGTH {
            return Err(DispatchError::Validation(format!(
                "Title must be 1 to {MAX_TITLE_LENGTH} characters"
            )));
        }
        if input.message.trim().is_empty() {
            return Err(DispatchError::Validation(
                "Message cannot be empty".to_string(),
            ));
        }

        let alert = Alert::new(title, input.message, input.severity);
        self.repo.create(&alert).await?;

        tracing::info!(alert_id = %alert.alert_id, severity = %alert.severity, "Disaster alert broadcast");

        Ok(alert)
    }

    /// Public paginated feed, newest first
    pub async fn list(&self, page: PageRequest) -> DispatchResult<Page<Alert>> {
        self.repo.list(&page).await
    }
}
