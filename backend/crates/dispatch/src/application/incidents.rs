//! Incident Use Cases
//!
//! User-facing reads are owner-scoped: asking for someone else's
//! incident is a 404, the same as asking for one that does not exist.

use std::sync::Arc;

use auth::Principal;
use kernel::id::IncidentId;

use crate::domain::entity::incident::Incident;
use crate::domain::repository::IncidentRepository;
use crate::domain::value_object::{
    geo::Coordinates,
    incident_status::IncidentStatus,
    pagination::{Page, PageRequest},
};
use crate::error::{DispatchError, DispatchResult};

const MIN_DESCRIPTION_LENGTH: usize = 10;
const MAX_TYPE_LENGTH: usize = 100;

/// Create incident input
pub struct CreateIncidentInput {
    pub incident_type: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub image_url: Option<String>,
}

/// Admin update input; `None` fields stay unchanged
pub struct UpdateIncidentInput {
    pub status: Option<String>,
    pub risk_score: Option<f64>,
    pub risk_level: Option<String>,
}

/// Incident use cases
pub struct IncidentsUseCase<R: IncidentRepository> {
    repo: Arc<R>,
}

impl<R: IncidentRepository> IncidentsUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a report for the calling user; status starts at `Pending`
    pub async fn create(
        &self,
        principal: &Principal,
        input: CreateIncidentInput,
    ) -> DispatchResult<Incident> {
        let incident_type = input.incident_type.trim().to_string();
        if incident_type.is_empty() || incident_type.len() > MAX_TYPE_LENGTH {
            return Err(DispatchError::Validation(format!(
                "Type must be 1 to {MAX_TYPE_LENGTH} characters"
            )));
        }
        if input.description.trim().chars().count() < MIN_DESCRIPTION_LENGTH {
            return Err(DispatchError::Validation(format!(
                "Description must be at least {MIN_DESCRIPTION_LENGTH} characters"
            )));
        }

        let coordinates = Coordinates::new(input.lat, input.lng)?;
        let incident = Incident::new(
            principal.user_id,
            incident_type,
            input.description,
            coordinates,
            input.image_url,
        );

        self.repo.create(&incident).await?;
        tracing::info!(incident_id = %incident.incident_id, user_id = %principal.user_id, "Incident reported");

        Ok(incident)
    }

    pub async fn list_for_user(
        &self,
        principal: &Principal,
        page: PageRequest,
    ) -> DispatchResult<Page<Incident>> {
        self.repo.list_for_user(&principal.user_id, &page).await
    }

    /// Owner-scoped lookup; others' incidents are indistinguishable from
    /// missing ones
    pub async fn get_owned(
        &self,
        principal: &Principal,
        incident_id: IncidentId,
    ) -> DispatchResult<Incident> {
        self.repo
            .find_owned(&incident_id, &principal.user_id)
            .await?
            .ok_or(DispatchError::NotFound("Incident"))
    }

    /// Admin list with optional status filter; unknown status codes are
    /// a validation error, not an empty result
    pub async fn list_all(
        &self,
        status_filter: Option<&str>,
        page: PageRequest,
    ) -> DispatchResult<Page<Incident>> {
        let status = status_filter
            .map(|code| {
                IncidentStatus::from_code(code).ok_or_else(|| {
                    DispatchError::Validation(format!("Invalid status: {code}"))
                })
            })
            .transpose()?;

        self.repo.list_all(status, &page).await
    }

    /// Admin field update (status / risk score / risk level)
    pub async fn update(
        &self,
        incident_id: IncidentId,
        input: UpdateIncidentInput,
    ) -> DispatchResult<Incident> {
        let mut incident = self
            .repo
            .find_by_id(&incident_id)
            .await?
            .ok_or(DispatchError::NotFound("Incident"))?;

        if let Some(code) = input.status {
            incident.status = IncidentStatus::from_code(&code).ok_or_else(|| {
                DispatchError::Validation(format!("Invalid status: {code}"))
            })?;
        }
        if let Some(score) = input.risk_score {
            if !score.is_finite() || !(0.0..=100.0).contains(&score) {
                return Err(DispatchError::Validation(
                    "Risk score must be between 0 and 100".to_string(),
                ));
            }
            incident.risk_score = Some(score);
        }
        if let Some(level) = input.risk_level {
            incident.risk_level = Some(level);
        }

        self.repo.update(&incident).await?;
        Ok(incident)
    }

    /// Shortcut for the verify action
    pub async fn set_status(
        &self,
        incident_id: IncidentId,
        status: IncidentStatus,
    ) -> DispatchResult<Incident> {
        let mut incident = self
            .repo
            .find_by_id(&incident_id)
            .await?
            .ok_or(DispatchError::NotFound("Incident"))?;

        incident.status = status;
        self.repo.update(&incident).await?;
        tracing::info!(incident_id = %incident.incident_id, status = %status, "Incident status changed");

        Ok(incident)
    }
}
