//! Ability Value Object
//!
//! Accessibility profile a user can declare at registration. Dispatchers
//! use it to adapt how they contact the reporter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared accessibility profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ability {
    Blind,
    Deaf,
    NonVerbal,
    Elderly,
    Other,
    #[default]
    None,
}

impl Ability {
    /// Storage code for this ability
    pub const fn code(&self) -> &'static str {
        match self {
            Ability::Blind => "BLIND",
            Ability::Deaf => "DEAF",
            Ability::NonVerbal => "NON_VERBAL",
            Ability::Elderly => "ELDERLY",
            Ability::Other => "OTHER",
            Ability::None => "NONE",
        }
    }

    /// Parse a storage code. Unknown codes return `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "BLIND" => Some(Ability::Blind),
            "DEAF" => Some(Ability::Deaf),
            "NON_VERBAL" => Some(Ability::NonVerbal),
            "ELDERLY" => Some(Ability::Elderly),
            "OTHER" => Some(Ability::Other),
            "NONE" => Some(Ability::None),
            _ => None,
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for ability in [
            Ability::Blind,
            Ability::Deaf,
            Ability::NonVerbal,
            Ability::Elderly,
            Ability::Other,
            Ability::None,
        ] {
            assert_eq!(Ability::from_code(ability.code()), Some(ability));
        }
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(
            serde_json::to_string(&Ability::NonVerbal).unwrap(),
            "\"NON_VERBAL\""
        );
    }
}
