//! Message Kind Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of dashboard message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    Sos,
    Incident,
    General,
}

impl MessageKind {
    /// Storage code for this kind
    pub const fn code(&self) -> &'static str {
        match self {
            MessageKind::Sos => "SOS",
            MessageKind::Incident => "INCIDENT",
            MessageKind::General => "GENERAL",
        }
    }

    /// Parse a storage code. Unknown codes return `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SOS" => Some(MessageKind::Sos),
            "INCIDENT" => Some(MessageKind::Incident),
            "GENERAL" => Some(MessageKind::General),
            _ => None,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for kind in [MessageKind::Sos, MessageKind::Incident, MessageKind::General] {
            assert_eq!(MessageKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&MessageKind::Sos).unwrap(), "\"SOS\"");
    }
}
