//! SOS Use Cases

use std::sync::Arc;

use auth::Principal;
use auth::models::ability::Ability;

use crate::domain::entity::sos_alert::SosAlert;
use crate::domain::repository::SosRepository;
use crate::domain::value_object::{
    geo::{BatteryLevel, Coordinates},
    pagination::{Page, PageRequest},
    sos_status::SosStatus,
};
use crate::error::DispatchResult;

/// Create SOS input
pub struct CreateSosInput {
    pub ability: Ability,
    pub lat: f64,
    pub lng: f64,
    pub battery: i16,
    pub status: SosStatus,
}

/// SOS use cases
pub struct SosUseCase<R: SosRepository> {
    repo: Arc<R>,
}

impl<R: SosRepository> SosUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        principal: &Principal,
        input: CreateSosInput,
    ) -> DispatchResult<SosAlert> {
        let coordinates = Coordinates::new(input.lat, input.lng)?;
        let battery = BatteryLevel::new(input.battery)?;

        let alert = SosAlert::new(
            principal.user_id,
            input.ability,
            coordinates,
            battery,
            input.status,
        );
        self.repo.create(&alert).await?;

        tracing::warn!(
            sos_id = %alert.sos_id,
            user_id = %principal.user_id,
            status = %alert.status,
            "SOS alert raised"
        );

        Ok(alert)
    }

    pub async fn list_for_user(
        &self,
        principal: &Principal,
        page: PageRequest,
    ) -> DispatchResult<Page<SosAlert>> {
        self.repo.list_for_user(&principal.user_id, &page).await
    }
}
