//! Incident Status Value Object
//!
//! Moderation lifecycle of an incident report. New reports always start
//! at `Pending`; only admins move them further.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Incident report status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentStatus {
    #[default]
    Pending,
    UnderReview,
    Verified,
    HelpAssigned,
    Resolved,
}

impl IncidentStatus {
    /// Storage code for this status
    pub const fn code(&self) -> &'static str {
        match self {
            IncidentStatus::Pending => "PENDING",
            IncidentStatus::UnderReview => "UNDER_REVIEW",
            IncidentStatus::Verified => "VERIFIED",
            IncidentStatus::HelpAssigned => "HELP_ASSIGNED",
            IncidentStatus::Resolved => "RESOLVED",
        }
    }

    /// Parse a storage code. Unknown codes return `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PENDING" => Some(IncidentStatus::Pending),
            "UNDER_REVIEW" => Some(IncidentStatus::UnderReview),
            "VERIFIED" => Some(IncidentStatus::Verified),
            "HELP_ASSIGNED" => Some(IncidentStatus::HelpAssigned),
            "RESOLVED" => Some(IncidentStatus::Resolved),
            _ => None,
        }
    }
}

impl fmt::Display for IncidentStatus {
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
            IncidentStatus::Pending,
            IncidentStatus::UnderReview,
            IncidentStatus::Verified,
            IncidentStatus::HelpAssigned,
            IncidentStatus::Resolved,
        ] {
            assert_eq!(IncidentStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(IncidentStatus::from_code("ESCALATED"), None);
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(IncidentStatus::default(), IncidentStatus::Pending);
    }
}
