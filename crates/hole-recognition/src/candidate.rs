use scene_graph::{EdgeHandle, HandleId};
use sheet_kernel::{Point3d, Vec3};

use crate::classify::HoleType;

/// Circle of a candidate loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleDescriptor {
    pub center: Point3d,
    pub axis: Vec3,
    pub radius: f64,
}

/// A single-edge circular inner loop that may be a hole.
///
/// The candidate owns its edge handle. Dropping the candidate releases it.
#[derive(Debug)]
pub struct HoleCandidate<'g> {
    /// Running index over single-edge inner loops, counting rejected ones too.
    pub loop_index: usize,
    pub circle: CircleDescriptor,
    /// Normal of the scanned face at the co-edge midpoint.
    pub this_face_normal: Vec3,
    /// Normal of the adjacent face at its co-edge midpoint.
    pub partner_face_normal: Vec3,
    /// Direction of travel of the scanned face's co-edge at its midpoint.
    pub edge_tangent: Vec3,
    /// Adjacent face bounds as `[x1, y1, z1, x2, y2, z2]`.
    pub partner_box: [f64; 6],
    pub hole_type: HoleType,
    pub edge: EdgeHandle<'g>,
}

impl HoleCandidate<'_> {
    /// Identity of the candidate's edge handle.
    pub fn edge_id(&self) -> HandleId {
        self.edge.id()
    }
}
