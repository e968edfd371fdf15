//! Geographic and Device Value Objects

use crate::error::{DispatchError, DispatchResult};

/// Validated WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    /// Create validated coordinates (lat in [-90, 90], lng in [-180, 180])
    pub fn new(lat: f64, lng: f64) -> DispatchResult<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(DispatchError::Validation(format!(
                "Latitude must be between -90 and 90 (got {lat})"
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(DispatchError::Validation(format!(
                "Longitude must be between -180 and 180 (got {lng})"
            )));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// Device battery percentage reported with an SOS alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryLevel(i16);

impl BatteryLevel {
    /// Create a validated battery level (0-100)
    pub fn new(percent: i16) -> DispatchResult<Self> {
        if !(0..=100).contains(&percent) {
            return Err(DispatchError::Validation(format!(
                "Battery must be between 0 and 100 (got {percent})"
            )));
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> i16 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(90.1, 0.0).is_err());
        assert!(Coordinates::new(0.0, -180.5).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_battery_bounds() {
        assert!(BatteryLevel::new(0).is_ok());
        assert!(BatteryLevel::new(100).is_ok());
        assert!(BatteryLevel::new(-1).is_err());
        assert!(BatteryLevel::new(101).is_err());
    }
}
