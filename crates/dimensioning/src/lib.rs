//! Outline dimensions for drawing views: straight edges mapped onto the
//! sheet, their bounds, and where the width and height dimensions go.

pub mod bounds;
pub mod config;
pub mod curve_transform;
pub mod edge_extract;
pub mod error;
pub mod placement;

pub use bounds::{BoundEdges, BoundarySolver, BoundsRecord};
pub use config::DimensionConfig;
pub use curve_transform::{transform_direction, transform_point};
pub use edge_extract::{extract_straight_edges, BoundaryEdge};
pub use error::DimensionError;
pub use placement::{
    dimension_views, plan_view_dimensions, reference_metrics, DimensionAxis, DimensionSink, DimensionSummary,
    PlacedDimension, PlannedDimension, RecordingSink, ReferenceMetrics, ToleranceStyle,
};
