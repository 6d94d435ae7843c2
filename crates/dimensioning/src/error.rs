use scene_graph::{HandleId, SceneError};

/// Errors from edge extraction and dimension placement.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DimensionError {
    #[error("scene graph query failed: {0}")]
    Scene(#[from] SceneError),

    #[error("view {view:?} has no straight edges")]
    NoStraightEdges { view: HandleId },

    #[error("none of {edges} edges is vertical")]
    NoVerticalEdges { edges: usize },

    #[error("none of {edges} edges is horizontal")]
    NoHorizontalEdges { edges: usize },

    #[error("no drawing views to dimension")]
    NoViews,

    #[error("invalid dimension config: {reason}")]
    InvalidConfig { reason: String },
}
