//! Tunables for dimension placement.

use serde::{Deserialize, Serialize};

use crate::error::DimensionError;

/// Parameters of a dimensioning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionConfig {
    /// The placement offset is the first view's smaller extent divided by this.
    pub offset_divisor: f64,
    /// Sideways shift of the second view's width dimension (sheet units).
    pub second_view_shift: f64,
}

impl Default for DimensionConfig {
    fn default() -> Self {
        Self {
            offset_divisor: 5.0,
            second_view_shift: 0.02125,
        }
    }
}

impl DimensionConfig {
    /// Load a (possibly partial) JSON document over the defaults.
    pub fn from_json(json: &str) -> Result<Self, DimensionError> {
        let config: Self = serde_json::from_str(json).map_err(|e| DimensionError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DimensionError> {
        if !(self.offset_divisor > 0.0 && self.offset_divisor.is_finite()) {
            return Err(DimensionError::InvalidConfig {
                reason: format!("offset_divisor must be positive, got {}", self.offset_divisor),
            });
        }
        if !self.second_view_shift.is_finite() {
            return Err(DimensionError::InvalidConfig {
                reason: format!("second_view_shift must be finite, got {}", self.second_view_shift),
            });
        }
        Ok(())
    }
}
