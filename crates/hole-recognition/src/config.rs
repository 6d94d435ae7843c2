//! Tunables for hole recognition.

use serde::{Deserialize, Serialize};

use crate::error::RecognitionError;

/// Parameters of a hole-recognition run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Circles with a radius at or above this are not holes (meters).
    pub exclusion_radius: f64,
    /// Fail the run when no candidate survives filtering.
    pub require_holes: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            exclusion_radius: 0.01775,
            require_holes: false,
        }
    }
}

impl RecognitionConfig {
    /// Defaults, but an empty result is an error.
    pub fn strict() -> Self {
        Self {
            require_holes: true,
            ..Self::default()
        }
    }

    /// Load a (possibly partial) JSON document over the defaults.
    pub fn from_json(json: &str) -> Result<Self, RecognitionError> {
        let config: Self = serde_json::from_str(json).map_err(|e| RecognitionError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RecognitionError> {
        if !(self.exclusion_radius > 0.0 && self.exclusion_radius.is_finite()) {
            return Err(RecognitionError::InvalidConfig {
                reason: format!("exclusion_radius must be positive, got {}", self.exclusion_radius),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RecognitionConfig::default();
        assert_eq!(config.exclusion_radius, 0.01775);
        assert!(!config.require_holes);
        assert!(RecognitionConfig::strict().require_holes);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RecognitionConfig::from_json(r#"{ "require_holes": true }"#).unwrap();
        assert_eq!(config.exclusion_radius, 0.01775);
        assert!(config.require_holes);
    }

    #[test]
    fn test_rejects_bad_radius() {
        let err = RecognitionConfig::from_json(r#"{ "exclusion_radius": -1.0 }"#).unwrap_err();
        assert!(matches!(err, RecognitionError::InvalidConfig { .. }));
        assert!(RecognitionConfig::from_json("not json").is_err());
    }
}
