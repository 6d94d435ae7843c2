use sheet_kernel::{Point3d, Transform, Vec3};

use crate::handle::*;
use crate::types::*;

/// Read-only view of a CAD scene: drawing views, faces, loops, co-edges,
/// edges and their geometry.
///
/// Every query that yields another entity hands out a fresh [`Handle`] the
/// caller owns. Handles borrow the scene, so the scene cannot be mutated
/// while any of them is alive.
pub trait SceneGraph: Release {
    /// Drawing views in sheet order.
    fn drawing_views(&self) -> Vec<ViewHandle<'_>>;

    /// Faces facing the viewer in a drawing view.
    fn visible_faces(&self, view: &ViewHandle<'_>) -> Result<Vec<FaceHandle<'_>>, SceneError>;

    /// Edges drawn in a drawing view, each listed once.
    fn visible_edges(&self, view: &ViewHandle<'_>) -> Result<Vec<EdgeHandle<'_>>, SceneError>;

    /// Loops bounding a face, outer loop first.
    fn face_loops(&self, face: &FaceHandle<'_>) -> Result<Vec<LoopHandle<'_>>, SceneError>;

    fn loop_is_outer(&self, lp: &LoopHandle<'_>) -> Result<bool, SceneError>;

    fn loop_edge_count(&self, lp: &LoopHandle<'_>) -> Result<usize, SceneError>;

    fn loop_first_coedge(&self, lp: &LoopHandle<'_>) -> Result<CoEdgeHandle<'_>, SceneError>;

    fn loop_edges(&self, lp: &LoopHandle<'_>) -> Result<Vec<EdgeHandle<'_>>, SceneError>;

    fn loop_face(&self, lp: &LoopHandle<'_>) -> Result<FaceHandle<'_>, SceneError>;

    /// The co-edge on the adjacent face sharing this co-edge's edge.
    fn coedge_partner(&self, coedge: &CoEdgeHandle<'_>) -> Result<CoEdgeHandle<'_>, SceneError>;

    fn coedge_curve_params(&self, coedge: &CoEdgeHandle<'_>) -> Result<ParamRange, SceneError>;

    fn coedge_evaluate(&self, coedge: &CoEdgeHandle<'_>, t: f64) -> Result<CoEdgePoint, SceneError>;

    fn coedge_loop(&self, coedge: &CoEdgeHandle<'_>) -> Result<LoopHandle<'_>, SceneError>;

    fn edge_curve(&self, edge: &EdgeHandle<'_>) -> Result<CurveHandle<'_>, SceneError>;

    fn curve_kind(&self, curve: &CurveHandle<'_>) -> Result<CurveKind, SceneError>;

    fn circle_params(&self, curve: &CurveHandle<'_>) -> Result<CircleParams, SceneError>;

    fn line_params(&self, curve: &CurveHandle<'_>) -> Result<LineParams, SceneError>;

    fn face_surface(&self, face: &FaceHandle<'_>) -> Result<SurfaceHandle<'_>, SceneError>;

    /// Natural normal of the surface at a point, ignoring any face's sense.
    fn surface_normal_at(&self, surface: &SurfaceHandle<'_>, point: &Point3d) -> Result<Vec3, SceneError>;

    fn face_area(&self, face: &FaceHandle<'_>) -> Result<f64, SceneError>;

    /// Bounding box as `[x1, y1, z1, x2, y2, z2]`.
    fn face_box(&self, face: &FaceHandle<'_>) -> Result<[f64; 6], SceneError>;

    /// True when the face normal is opposite to its surface's natural normal.
    fn face_sense_reversed(&self, face: &FaceHandle<'_>) -> Result<bool, SceneError>;

    fn model_to_view_transform(&self, view: &ViewHandle<'_>) -> Result<ViewTransformHandle<'_>, SceneError>;

    fn transform_data(&self, transform: &ViewTransformHandle<'_>) -> Result<Transform, SceneError>;
}

/// Collects edges into a host-side selection.
pub trait SelectionAccumulator {
    fn add_edge(&mut self, edge: &EdgeHandle<'_>) -> Result<(), SceneError>;
}
