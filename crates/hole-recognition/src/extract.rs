use scene_graph::{CoEdgeHandle, CurveKind, FaceHandle, LoopHandle, SceneError, SceneGraph};
use sheet_kernel::Vec3;
use tracing::{debug, info, instrument};

use crate::candidate::{CircleDescriptor, HoleCandidate};
use crate::classify::classify;
use crate::error::RecognitionError;
use crate::progress::ProgressSink;

/// Scan faces for single-edge inner loops bounded by a circle.
///
/// Takes ownership of `faces`; each face handle is released once its loops
/// have been scanned. Only the edge handle of each candidate outlives this
/// call.
#[instrument(skip(scene, faces, progress), fields(faces = faces.len()))]
pub fn extract_hole_candidates<'g, S>(
    scene: &'g S,
    faces: Vec<FaceHandle<'g>>,
    progress: &mut dyn ProgressSink,
) -> Result<Vec<HoleCandidate<'g>>, RecognitionError>
where
    S: SceneGraph + ?Sized,
{
    let total = faces.len();
    let mut candidates = Vec::new();
    let mut loop_index = 0;

    for (face_index, face) in faces.into_iter().enumerate() {
        progress.scanning_face(face_index, total);

        for lp in scene.face_loops(&face)? {
            if scene.loop_is_outer(&lp)? || scene.loop_edge_count(&lp)? != 1 {
                continue;
            }
            if let Some(candidate) = try_extract_candidate(scene, &lp, loop_index)? {
                candidates.push(candidate);
            }
            loop_index += 1;
        }
    }

    info!(candidates = candidates.len(), loops = loop_index, "extracted hole candidates");
    Ok(candidates)
}

fn try_extract_candidate<'g, S>(
    scene: &'g S,
    lp: &LoopHandle<'g>,
    loop_index: usize,
) -> Result<Option<HoleCandidate<'g>>, RecognitionError>
where
    S: SceneGraph + ?Sized,
{
    let this_coedge = scene.loop_first_coedge(lp)?;
    let partner_coedge = scene.coedge_partner(&this_coedge)?;

    let Some(edge) = scene.loop_edges(lp)?.into_iter().next() else {
        return Err(SceneError::EmptyLoop { id: lp.id() }.into());
    };
    let curve = scene.edge_curve(&edge)?;
    if scene.curve_kind(&curve)? != CurveKind::Circle {
        debug!(loop_index, "single-edge loop is not circular");
        return Ok(None);
    }

    let partner_face = coedge_face(scene, &partner_coedge)?;
    let partner_area = scene.face_area(&partner_face)?;

    let params = scene.circle_params(&curve)?;
    let this_face_normal = face_normal_at_mid_coedge(scene, &this_coedge)?;
    let partner_face_normal = face_normal_at_mid_coedge(scene, &partner_coedge)?;
    let edge_tangent = tangent_at_mid_coedge(scene, &this_coedge)?;
    let partner_box = scene.face_box(&partner_face)?;

    let hole_type = classify(partner_area);
    debug!(loop_index, radius = params.radius, area = partner_area, %hole_type, "hole candidate");

    Ok(Some(HoleCandidate {
        loop_index,
        circle: CircleDescriptor {
            center: params.center,
            axis: params.axis,
            radius: params.radius,
        },
        this_face_normal,
        partner_face_normal,
        edge_tangent,
        partner_box,
        hole_type,
        edge,
    }))
}

fn coedge_face<'g, S>(scene: &'g S, coedge: &CoEdgeHandle<'g>) -> Result<FaceHandle<'g>, SceneError>
where
    S: SceneGraph + ?Sized,
{
    let lp = scene.coedge_loop(coedge)?;
    scene.loop_face(&lp)
}

/// Outward normal of the co-edge's face at the co-edge midpoint.
pub fn face_normal_at_mid_coedge<'g, S>(scene: &'g S, coedge: &CoEdgeHandle<'g>) -> Result<Vec3, SceneError>
where
    S: SceneGraph + ?Sized,
{
    let mid = scene.coedge_curve_params(coedge)?.mid();
    let at = scene.coedge_evaluate(coedge, mid)?;
    let face = coedge_face(scene, coedge)?;
    let surface = scene.face_surface(&face)?;
    let normal = scene.surface_normal_at(&surface, &at.point)?;
    Ok(if scene.face_sense_reversed(&face)? { -normal } else { normal })
}

/// Direction of travel of the co-edge at its midpoint.
pub fn tangent_at_mid_coedge<'g, S>(scene: &'g S, coedge: &CoEdgeHandle<'g>) -> Result<Vec3, SceneError>
where
    S: SceneGraph + ?Sized,
{
    let mid = scene.coedge_curve_params(coedge)?.mid();
    Ok(scene.coedge_evaluate(coedge, mid)?.tangent)
}
