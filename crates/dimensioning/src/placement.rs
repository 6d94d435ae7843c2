//! Where the outline dimensions of each view go.

use scene_graph::{HandleId, SceneGraph, ViewHandle};
use serde::{Deserialize, Serialize};
use sheet_kernel::Point2d;
use tracing::{debug, info, instrument};

use crate::bounds::{BoundEdges, BoundarySolver, BoundsRecord};
use crate::config::DimensionConfig;
use crate::edge_extract::{extract_straight_edges, BoundaryEdge};
use crate::error::DimensionError;

/// Metrics taken from the first view and reused for every view of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMetrics {
    /// Distance between a view's outline and its dimension lines.
    pub offset: f64,
}

impl ReferenceMetrics {
    pub fn from_bounds(bounds: &BoundsRecord, config: &DimensionConfig) -> Self {
        Self {
            offset: bounds.width().min(bounds.height()) / config.offset_divisor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DimensionAxis {
    /// Measures along sheet x, between the leftmost and rightmost edges.
    Horizontal,
    /// Measures along sheet y, between the bottommost and topmost edges.
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToleranceStyle {
    #[default]
    None,
    Symmetric,
}

/// A dimension between two bound edges, anchored at `at` on the sheet.
#[derive(Debug, Clone, Copy)]
pub struct PlannedDimension<'a, 'g> {
    pub axis: DimensionAxis,
    pub first: &'a BoundaryEdge<'g>,
    pub second: &'a BoundaryEdge<'g>,
    pub at: Point2d,
    pub tolerance: ToleranceStyle,
}

/// Receives the dimensions of a run. Edges are selected by their sheet
/// positions, which is how a drawing picks them.
pub trait DimensionSink {
    fn add_dimension(&mut self, dimension: &PlannedDimension<'_, '_>) -> Result<(), DimensionError>;
}

/// Dimensions for the view at `view_index`. The first view gets width and
/// height, the second only width, and later views none.
pub fn plan_view_dimensions<'a, 'g>(
    view_index: usize,
    bound: &BoundEdges<'a, 'g>,
    bounds: &BoundsRecord,
    metrics: &ReferenceMetrics,
    config: &DimensionConfig,
) -> Vec<PlannedDimension<'a, 'g>> {
    let width_x = (bound.x_min.x + bound.x_max.x) / 2.0;
    let width_y = bounds.y_max + metrics.offset;
    let width = |x: f64, tolerance| PlannedDimension {
        axis: DimensionAxis::Horizontal,
        first: bound.x_min,
        second: bound.x_max,
        at: Point2d::new(x, width_y),
        tolerance,
    };

    match view_index {
        0 => vec![
            width(width_x, ToleranceStyle::None),
            PlannedDimension {
                axis: DimensionAxis::Vertical,
                first: bound.y_min,
                second: bound.y_max,
                at: Point2d::new(bounds.x_min - metrics.offset, (bound.y_min.y + bound.y_max.y) / 2.0),
                tolerance: ToleranceStyle::None,
            },
        ],
        1 => vec![width(width_x + config.second_view_shift, ToleranceStyle::Symmetric)],
        _ => Vec::new(),
    }
}

/// Offset for a run, from the outline of its first view.
#[instrument(skip_all)]
pub fn reference_metrics<'g, S>(
    scene: &'g S,
    first_view: &ViewHandle<'g>,
    config: &DimensionConfig,
) -> Result<ReferenceMetrics, DimensionError>
where
    S: SceneGraph + ?Sized,
{
    let solver = BoundarySolver::new(extract_straight_edges(scene, first_view)?)?;
    let metrics = ReferenceMetrics::from_bounds(solver.bounds(), config);
    info!(offset = metrics.offset, "reference metrics");
    Ok(metrics)
}

/// Totals of a dimensioning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionSummary {
    pub views: usize,
    pub dimensions: usize,
    pub offset: f64,
}

/// Dimension the outline of every view. Each view's edges are released
/// once its dimensions have been handed to `sink`.
#[instrument(skip_all, fields(views = views.len()))]
pub fn dimension_views<'g, S>(
    scene: &'g S,
    views: &[ViewHandle<'g>],
    sink: &mut dyn DimensionSink,
    config: &DimensionConfig,
) -> Result<DimensionSummary, DimensionError>
where
    S: SceneGraph + ?Sized,
{
    config.validate()?;
    let first = views.first().ok_or(DimensionError::NoViews)?;
    let metrics = reference_metrics(scene, first, config)?;

    let mut dimensions = 0;
    for (index, view) in views.iter().enumerate() {
        let solver = BoundarySolver::new(extract_straight_edges(scene, view)?)?;
        let bound = solver.find_bound_edges()?;
        for dimension in plan_view_dimensions(index, &bound, solver.bounds(), &metrics, config) {
            debug!(view = index, axis = ?dimension.axis, x = dimension.at.x, y = dimension.at.y, "placing dimension");
            sink.add_dimension(&dimension)?;
            dimensions += 1;
        }
    }

    info!(dimensions, offset = metrics.offset, "dimensioned views");
    Ok(DimensionSummary {
        views: views.len(),
        dimensions,
        offset: metrics.offset,
    })
}

/// A dimension as recorded by [`RecordingSink`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedDimension {
    pub axis: DimensionAxis,
    /// Sheet positions of the two dimensioned edges.
    pub first: Point2d,
    pub second: Point2d,
    pub first_edge: HandleId,
    pub second_edge: HandleId,
    pub at: Point2d,
    pub tolerance: ToleranceStyle,
}

/// Sink that keeps every dimension it is given.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub placed: Vec<PlacedDimension>,
}

impl DimensionSink for RecordingSink {
    fn add_dimension(&mut self, dimension: &PlannedDimension<'_, '_>) -> Result<(), DimensionError> {
        self.placed.push(PlacedDimension {
            axis: dimension.axis,
            first: Point2d::new(dimension.first.x, dimension.first.y),
            second: Point2d::new(dimension.second.x, dimension.second.y),
            first_edge: dimension.first.edge_id(),
            second_edge: dimension.second.edge_id(),
            at: dimension.at,
            tolerance: dimension.tolerance,
        });
        Ok(())
    }
}
