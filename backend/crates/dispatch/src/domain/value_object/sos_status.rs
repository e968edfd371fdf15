//! SOS Status Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Self-reported condition attached to an SOS alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SosStatus {
    Trapped,
    Injured,
    NeedHelp,
    Safe,
}

impl SosStatus {
    /// Storage code for this status
    pub const fn code(&self) -> &'static str {
        match self {
            SosStatus::Trapped => "TRAPPED",
            SosStatus::Injured => "INJURED",
            SosStatus::NeedHelp => "NEED_HELP",
            SosStatus::Safe => "SAFE",
        }
    }

    /// Parse a storage code. Unknown codes return `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TRAPPED" => Some(SosStatus::Trapped),
            "INJURED" => Some(SosStatus::Injured),
            "NEED_HELP" => Some(SosStatus::NeedHelp),
            "SAFE" => Some(SosStatus::Safe),
            _ => None,
        }
    }
}

impl fmt::Display for SosStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for status in [
            SosStatus::Trapped,
            SosStatus::Injured,
            SosStatus::NeedHelp,
            SosStatus::Safe,
        ] {
            assert_eq!(SosStatus::from_code(status.code()), Some(status));
        }
    }
}
