use scene_graph::{CurveKind, EdgeHandle, HandleId, SceneGraph, ViewHandle};
use tracing::{debug, info, instrument};

use crate::curve_transform::{transform_direction, transform_point};
use crate::error::DimensionError;

/// A straight visible edge mapped onto the sheet.
///
/// Owns its edge handle; dropping the record releases it.
#[derive(Debug)]
pub struct BoundaryEdge<'g> {
    /// Sheet position of the line's origin.
    pub x: f64,
    pub y: f64,
    /// Unit sheet direction.
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub edge: EdgeHandle<'g>,
}

impl BoundaryEdge<'_> {
    /// Runs up the sheet rather than across it.
    pub fn is_vertical(&self) -> bool {
        self.dy.abs() > self.dx.abs()
    }

    pub fn edge_id(&self) -> HandleId {
        self.edge.id()
    }
}

/// Collect the straight visible edges of `view` in sheet coordinates.
/// Curved edges are released as they are skipped.
#[instrument(skip(scene, view), fields(view = ?view.id()))]
pub fn extract_straight_edges<'g, S>(
    scene: &'g S,
    view: &ViewHandle<'g>,
) -> Result<Vec<BoundaryEdge<'g>>, DimensionError>
where
    S: SceneGraph + ?Sized,
{
    let transform = {
        let handle = scene.model_to_view_transform(view)?;
        scene.transform_data(&handle)?
    };

    let mut edges = Vec::new();
    for edge in scene.visible_edges(view)? {
        let curve = scene.edge_curve(&edge)?;
        let kind = scene.curve_kind(&curve)?;
        if kind != CurveKind::Line {
            debug!(edge = ?edge.id(), ?kind, "skipping curved edge");
            continue;
        }
        let line = scene.line_params(&curve)?;
        let origin = transform_point(&transform, &line.origin);
        let direction = transform_direction(&transform, &line.direction);
        debug!(x = origin.x, y = origin.y, dx = direction.x, dy = direction.y, "straight edge");
        edges.push(BoundaryEdge {
            x: origin.x,
            y: origin.y,
            dx: direction.x,
            dy: direction.y,
            dz: direction.z,
            edge,
        });
    }

    if edges.is_empty() {
        return Err(DimensionError::NoStraightEdges { view: view.id() });
    }
    info!(edges = edges.len(), "extracted straight edges");
    Ok(edges)
}
