use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use tracing::{info, instrument};

use crate::geometry::curves::Curve;
use crate::geometry::point::Point3d;
use crate::geometry::surfaces::Surface;
use crate::geometry::transform::BoundingBox;

new_key_type! {
    pub struct VertexId;
    pub struct EdgeId;
    pub struct HalfEdgeId;
    pub struct LoopId;
    pub struct FaceId;
    pub struct ShellId;
    pub struct SolidId;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    pub point: Point3d,
}

/// A trimmed curve shared by exactly two faces. Closed edges start and end
/// on the same seam vertex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub curve: Curve,
    pub half_edges: (HalfEdgeId, HalfEdgeId),
    pub start_vertex: VertexId,
    pub end_vertex: VertexId,
}

/// The use of an edge by one loop (a co-edge).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HalfEdge {
    pub edge: EdgeId,
    /// Co-edge of the same edge in the neighbouring face.
    pub twin: HalfEdgeId,
    pub face: FaceId,
    pub loop_id: LoopId,
    pub start_vertex: VertexId,
    pub end_vertex: VertexId,
    pub t_start: f64,
    pub t_end: f64,
    /// Runs along the curve parameterization rather than against it.
    pub forward: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loop {
    pub half_edges: Vec<HalfEdgeId>,
    pub face: FaceId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    pub surface: Surface,
    pub outer_loop: LoopId,
    pub inner_loops: Vec<LoopId>,
    /// Outward normal equals the surface's natural normal.
    pub same_sense: bool,
    pub shell: ShellId,
    /// Kept current by the primitives that create or cut the face.
    pub area: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shell {
    pub faces: Vec<FaceId>,
    pub solid: SolidId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solid {
    pub shells: Vec<ShellId>,
}

/// Slot-map arenas holding a whole part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    pub vertices: SlotMap<VertexId, Vertex>,
    pub edges: SlotMap<EdgeId, Edge>,
    pub half_edges: SlotMap<HalfEdgeId, HalfEdge>,
    pub loops: SlotMap<LoopId, Loop>,
    pub faces: SlotMap<FaceId, Face>,
    pub shells: SlotMap<ShellId, Shell>,
    pub solids: SlotMap<SolidId, Solid>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outer loop first, then inner loops in insertion order.
    pub fn face_loops(&self, face_id: FaceId) -> Vec<LoopId> {
        let face = &self.faces[face_id];
        std::iter::once(face.outer_loop).chain(face.inner_loops.iter().copied()).collect()
    }

    /// Edges of a face in loop order, without repeats.
    pub fn face_edges(&self, face_id: FaceId) -> Vec<EdgeId> {
        let mut edges = Vec::new();
        let loops = self.face_loops(face_id);
        let uses = loops.iter().flat_map(|&l| self.loops[l].half_edges.iter());
        for he_id in uses {
            let edge = self.half_edges[*he_id].edge;
            if !edges.contains(&edge) {
                edges.push(edge);
            }
        }
        edges
    }

    /// Box around every loop of a face, with curved edges sampled.
    pub fn face_bounding_box(&self, face_id: FaceId) -> BoundingBox {
        const SAMPLES: usize = 8;
        let mut bb = BoundingBox::empty();
        for loop_id in self.face_loops(face_id) {
            for he_id in &self.loops[loop_id].half_edges {
                let he = &self.half_edges[*he_id];
                let curve = &self.edges[he.edge].curve;
                bb.include(&self.vertices[he.start_vertex].point);
                for i in 1..=SAMPLES {
                    let t = he.t_start + (he.t_end - he.t_start) * i as f64 / SAMPLES as f64;
                    bb.include(&curve.evaluate(t));
                }
            }
        }
        bb
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TopologyError {
    OpenLoop { loop_id: LoopId },
    UnpairedHalfEdge { half_edge: HalfEdgeId },
    TwinsRunSameWay { edge: EdgeId },
}

#[derive(Debug, Clone, Default)]
pub struct TopologyAudit {
    pub errors: Vec<TopologyError>,
}

impl TopologyAudit {
    pub fn all_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check that every loop of a solid closes and every co-edge has an opposed twin.
#[instrument(skip(store))]
pub fn audit_solid(store: &EntityStore, solid_id: SolidId) -> TopologyAudit {
    let mut audit = TopologyAudit::default();
    let faces = store.solids[solid_id]
        .shells
        .iter()
        .flat_map(|&s| store.shells[s].faces.iter().copied());

    for face_id in faces {
        for loop_id in store.face_loops(face_id) {
            let uses = &store.loops[loop_id].half_edges;
            if !loop_closes(store, uses) {
                audit.errors.push(TopologyError::OpenLoop { loop_id });
            }
            for &he_id in uses {
                let he = &store.half_edges[he_id];
                match store.half_edges.get(he.twin) {
                    Some(twin) if twin.twin != he_id => {
                        audit.errors.push(TopologyError::UnpairedHalfEdge { half_edge: he_id })
                    }
                    Some(twin) if twin.forward == he.forward => {
                        audit.errors.push(TopologyError::TwinsRunSameWay { edge: he.edge })
                    }
                    Some(_) => {}
                    None => audit.errors.push(TopologyError::UnpairedHalfEdge { half_edge: he_id }),
                }
            }
        }
    }
    info!(
        all_valid = audit.all_valid(),
        error_count = audit.errors.len(),
        "topology audit complete"
    );
    audit
}

fn loop_closes(store: &EntityStore, uses: &[HalfEdgeId]) -> bool {
    match (uses.first(), uses.last()) {
        (Some(first), Some(last)) => store.half_edges[*first].start_vertex == store.half_edges[*last].end_vertex,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::surfaces::Plane;
    use crate::geometry::vector::Vec3;

    #[test]
    fn test_empty_store() {
        let store = EntityStore::new();
        assert!(store.vertices.is_empty());
        assert!(store.faces.is_empty());
    }

    #[test]
    fn test_empty_loop_is_open() {
        let mut store = EntityStore::new();
        let solid = store.solids.insert(Solid { shells: vec![] });
        let shell = store.shells.insert(Shell { faces: vec![], solid });
        store.solids[solid].shells.push(shell);
        let loop_id = store.loops.insert(Loop {
            half_edges: vec![],
            face: FaceId::default(),
        });
        let face = store.faces.insert(Face {
            surface: Surface::Plane(Plane::new(Point3d::ORIGIN, Vec3::Z)),
            outer_loop: loop_id,
            inner_loops: vec![],
            same_sense: true,
            shell,
            area: 0.0,
        });
        store.shells[shell].faces.push(face);

        let audit = audit_solid(&store, solid);
        assert!(!audit.all_valid());
        assert_eq!(audit.errors, vec![TopologyError::OpenLoop { loop_id }]);
    }
}
