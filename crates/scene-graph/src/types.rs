use serde::{Deserialize, Serialize};
use sheet_kernel::{Point3d, Vec3};

use crate::handle::HandleId;

/// Errors from scene-graph queries.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SceneError {
    #[error("handle {id:?} is not live in this scene")]
    StaleHandle { id: HandleId },

    #[error("handle {id:?} refers to {found}, expected {expected}")]
    WrongKind {
        id: HandleId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("entity behind handle {id:?} no longer exists")]
    EntityNotFound { id: HandleId },

    #[error("loop behind handle {id:?} has no edges")]
    EmptyLoop { id: HandleId },

    #[error("query not supported: {query}: {reason}")]
    UnsupportedQuery { query: &'static str, reason: String },

    #[error("selection rejected: {reason}")]
    SelectionRejected { reason: String },
}

/// The curve kinds recognition and dimensioning care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveKind {
    Line,
    Circle,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleParams {
    pub center: Point3d,
    pub axis: Vec3,
    pub radius: f64,
}

/// A line as a position on it plus its direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineParams {
    pub origin: Point3d,
    pub direction: Vec3,
}

/// Parameter range a co-edge covers on its edge's curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub t_start: f64,
    pub t_end: f64,
}

impl ParamRange {
    /// The lower bound plus half the span.
    pub fn mid(&self) -> f64 {
        self.t_start.min(self.t_end) + (self.t_end - self.t_start).abs() / 2.0
    }
}

/// Position and tangent of a co-edge at a parameter. The tangent follows the
/// co-edge's direction of travel, not the curve's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoEdgePoint {
    pub point: Point3d,
    pub tangent: Vec3,
}
