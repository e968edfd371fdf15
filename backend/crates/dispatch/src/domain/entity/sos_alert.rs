//! SOS Alert Entity

use auth::models::ability::Ability;
use chrono::{DateTime, Utc};
use kernel::id::{SosAlertId, UserId};

use crate::domain::value_object::{
    geo::{BatteryLevel, Coordinates},
    sos_status::SosStatus,
};

/// One-tap emergency alert
#[derive(Debug, Clone)]
pub struct SosAlert {
    pub sos_id: SosAlertId,
    pub user_id: UserId,
    /// Accessibility context for responders
    pub ability: Ability,
    pub coordinates: Coordinates,
    pub battery: BatteryLevel,
    pub status: SosStatus,
    pub created_at: DateTime<Utc>,
}

impl SosAlert {
    pub fn new(
        user_id: UserId,
        ability: Ability,
        coordinates: Coordinates,
        battery: BatteryLevel,
        status: SosStatus,
    ) -> Self {
        Self {
            sos_id: SosAlertId::new(),
            user_id,
            ability,
            coordinates,
            battery,
            status,
            created_at: Utc::now(),
        }
    }
}
