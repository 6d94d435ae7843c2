//! Helper functions: error type, tooling geometry, progress capture.

use std::f64::consts::PI;

use dimensioning::DimensionError;
use hole_recognition::progress::{percent_complete, scanning_title};
use hole_recognition::{HoleType, ProgressSink, RecognitionError, KNOWN_AREAS};
use scene_graph::SceneError;
use sheet_kernel::topology::primitives::PrimitiveError;
use tracing::debug;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("feature not found: {name}")]
    FeatureNotFound { name: String },

    #[error("duplicate name: {name}")]
    DuplicateName { name: String },

    #[error("scene has no drawing views")]
    NoViews,

    #[error("no known wall area for {kind}")]
    NoKnownArea { kind: HoleType },

    #[error("primitive error: {0}")]
    Primitive(#[from] PrimitiveError),

    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    #[error("dimension error: {0}")]
    Dimension(#[from] DimensionError),

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("report serialization failed: {reason}")]
    Serialization { reason: String },
}

// ── Tooling Geometry ────────────────────────────────────────────────────────

/// Depth of a scribe mark, well under the thin-section limit.
pub const SCRIBE_DEPTH: f64 = 0.00005;

/// Plate thickness at which a through hole of `radius` has a wall of `area`.
pub fn wall_thickness_for_area(area: f64, radius: f64) -> f64 {
    area / (2.0 * PI * radius)
}

/// Plate thickness at which a through hole of `radius` is identified as `kind`.
pub fn thickness_for_hole_type(kind: HoleType, radius: f64) -> Result<f64, HarnessError> {
    KNOWN_AREAS
        .iter()
        .find(|(known, _)| *known == kind)
        .map(|(_, area)| wall_thickness_for_area(*area, radius))
        .ok_or(HarnessError::NoKnownArea { kind })
}

// ── Progress Capture ────────────────────────────────────────────────────────

/// Records every progress update.
#[derive(Debug, Clone, Default)]
pub struct ProgressLog {
    pub updates: Vec<(usize, usize)>,
}

impl ProgressSink for ProgressLog {
    fn scanning_face(&mut self, index: usize, total: usize) {
        debug!(
            title = %scanning_title(index, total),
            percent = percent_complete(index, total),
            "progress"
        );
        self.updates.push((index, total));
    }
}
