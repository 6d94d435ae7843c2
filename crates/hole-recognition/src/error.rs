use scene_graph::SceneError;

/// Errors from hole recognition.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecognitionError {
    #[error("scene graph query failed: {0}")]
    Scene(#[from] SceneError),

    #[error("no valid holes among {candidates} candidates")]
    NoValidHoles { candidates: usize },

    #[error("invalid recognition config: {reason}")]
    InvalidConfig { reason: String },

    #[error("hole table edit failed at row {row}, column {column}: {reason}")]
    TableEdit {
        row: usize,
        column: usize,
        reason: String,
    },
}
