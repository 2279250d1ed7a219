//! Serializable sensitivity profiles.
//!
//! Sensitivities are session-configured per logical index and lost on a hard
//! reset; [`SensitivityProfile`] lets an application persist them (TOML) and
//! restore them on the next run.
//!
//! Logical indices are only stable within a session, so a restored profile
//! assumes the same mice register in the same order (in practice: the same
//! enumeration order at init).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::manager::MultiMouse;

/// Persistable set of per-mouse sensitivity multipliers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensitivityProfile {
    /// Optional label for UI display.
    pub name: Option<String>,
    /// Multipliers indexed by logical device index.
    pub sensitivities: Vec<f32>,
}

impl SensitivityProfile {
    /// Captures the sensitivities currently configured on `mice`.
    pub fn capture(mice: &MultiMouse) -> Self {
        Self {
            name: None,
            sensitivities: mice.sensitivities().to_vec(),
        }
    }

    /// Applies every stored multiplier to `mice`.
    pub fn apply(&self, mice: &mut MultiMouse) {
        for (mouse, &value) in self.sensitivities.iter().enumerate() {
            mice.set_sensitivity(mouse, value);
        }
    }

    /// Encodes the profile as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Profile(e.to_string()))
    }

    /// Decodes a profile from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Profile(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_round_trip() {
        let profile = SensitivityProfile {
            name: Some("lefty".into()),
            sensitivities: vec![1.0, 0.5, 2.0],
        };
        let encoded = profile.to_toml_string().unwrap();
        let decoded = SensitivityProfile::from_toml_str(&encoded).unwrap();
        assert_eq!(decoded, profile);
    }

    #[test]
    fn malformed_toml_is_a_profile_error() {
        let err = SensitivityProfile::from_toml_str("sensitivities = \"no\"").unwrap_err();
        assert!(matches!(err, Error::Profile(_)));
    }
}
