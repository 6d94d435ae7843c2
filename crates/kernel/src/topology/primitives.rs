use std::collections::HashMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use super::brep::*;
use crate::geometry::curves::{Circle3d, Curve, Line3d};
use crate::geometry::point::Point3d;
use crate::geometry::surfaces::{Cylinder, Plane, Surface};
use crate::geometry::vector::Vec3;

#[derive(Debug, Clone, Error)]
pub enum PrimitiveError {
    #[error("invalid {name}: {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("feature at ({x}, {y}) with radius {radius} does not fit inside the plate outline")]
    OutsidePlate { x: f64, y: f64, radius: f64 },
}

/// A rectangular sheet-metal blank built by [`make_plate`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Plate {
    pub solid: SolidId,
    pub shell: ShellId,
    pub top: FaceId,
    pub bottom: FaceId,
    pub front: FaceId,
    pub back: FaceId,
    pub left: FaceId,
    pub right: FaceId,
    pub origin: Point3d,
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
}

impl Plate {
    pub fn top_z(&self) -> f64 {
        self.origin.z + self.thickness
    }
}

/// Faces and edges of a through hole.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HoleFeature {
    pub wall: FaceId,
    pub top_edge: EdgeId,
    pub bottom_edge: EdgeId,
}

/// Faces and edges of a blind circular pocket. Very shallow pockets model scribe marks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PocketFeature {
    pub wall: FaceId,
    pub floor: FaceId,
    pub rim_edge: EdgeId,
    pub floor_edge: EdgeId,
}

/// Faces and edges of a cylindrical boss standing on the top face.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BossFeature {
    pub wall: FaceId,
    pub cap: FaceId,
    pub base_edge: EdgeId,
    pub cap_edge: EdgeId,
}

fn require_positive(name: &'static str, value: f64) -> Result<(), PrimitiveError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PrimitiveError::InvalidDimension { name, value })
    }
}

/// Build an axis-aligned plate with its lower corner at `origin`. The top face
/// points +Z and every outer loop runs counter-clockwise about its face normal.
#[instrument(skip(store))]
pub fn make_plate(
    store: &mut EntityStore,
    origin: Point3d,
    width: f64,
    height: f64,
    thickness: f64,
) -> Result<Plate, PrimitiveError> {
    require_positive("width", width)?;
    require_positive("height", height)?;
    require_positive("thickness", thickness)?;
    info!(width, height, thickness, "creating plate primitive");

    // 0..3 run counter-clockwise around the bottom starting at `origin`; 4..7 sit above them.
    let corners: [Point3d; 8] = std::array::from_fn(|i| {
        let dx = if matches!(i % 4, 1 | 2) { width } else { 0.0 };
        let dy = if i % 4 >= 2 { height } else { 0.0 };
        let dz = if i >= 4 { thickness } else { 0.0 };
        origin + Vec3::new(dx, dy, dz)
    });
    let vertices: Vec<VertexId> = corners.iter().map(|&point| store.vertices.insert(Vertex { point })).collect();

    let solid = store.solids.insert(Solid { shells: vec![] });
    let shell = store.shells.insert(Shell { faces: vec![], solid });
    store.solids[solid].shells.push(shell);

    // Corner order of each outer loop, listed counter-clockwise seen from outside.
    let sides: [([usize; 4], Vec3, f64); 6] = [
        ([4, 5, 6, 7], Vec3::Z, width * height),
        ([0, 3, 2, 1], -Vec3::Z, width * height),
        ([0, 1, 5, 4], -Vec3::Y, width * thickness),
        ([3, 7, 6, 2], Vec3::Y, width * thickness),
        ([0, 4, 7, 3], -Vec3::X, height * thickness),
        ([1, 2, 6, 5], Vec3::X, height * thickness),
    ];

    // First co-edge seen for each undirected corner pair.
    let mut first_use: HashMap<(usize, usize), HalfEdgeId> = HashMap::new();
    let mut faces = Vec::with_capacity(sides.len());

    for (ring, normal, area) in sides {
        let center = corners[ring[0]].midpoint(&corners[ring[2]]);
        let (face, loop_id) = new_face(store, shell, Surface::Plane(Plane::new(center, normal)), true, area);
        faces.push(face);

        for k in 0..4 {
            let (from, to) = (ring[k], ring[(k + 1) % 4]);
            let key = (from.min(to), from.max(to));
            let he_id = store.half_edges.insert(HalfEdge {
                edge: EdgeId::default(),
                twin: HalfEdgeId::default(),
                face,
                loop_id,
                start_vertex: vertices[from],
                end_vertex: vertices[to],
                t_start: 0.0,
                t_end: corners[from].distance_to(&corners[to]),
                forward: from < to,
            });
            store.loops[loop_id].half_edges.push(he_id);

            let edge_id = match first_use.get(&key).copied() {
                Some(other) => {
                    let edge_id = store.half_edges[other].edge;
                    link_twins(store, edge_id, other, he_id);
                    edge_id
                }
                None => {
                    first_use.insert(key, he_id);
                    store.edges.insert(Edge {
                        curve: Curve::Line(Line3d::from_points(corners[key.0], corners[key.1])),
                        half_edges: (he_id, HalfEdgeId::default()),
                        start_vertex: vertices[key.0],
                        end_vertex: vertices[key.1],
                    })
                }
            };
            store.half_edges[he_id].edge = edge_id;
        }
    }
    debug!(faces = faces.len(), edges = first_use.len(), "plate topology built");

    Ok(Plate {
        solid,
        shell,
        top: faces[0],
        bottom: faces[1],
        front: faces[2],
        back: faces[3],
        left: faces[4],
        right: faces[5],
        origin,
        width,
        height,
        thickness,
    })
}

/// Cut a round through hole. The hole wall's normal points at the hole axis.
#[instrument(skip(store, plate))]
pub fn punch_hole(
    store: &mut EntityStore,
    plate: &Plate,
    x: f64,
    y: f64,
    radius: f64,
) -> Result<HoleFeature, PrimitiveError> {
    require_positive("radius", radius)?;
    check_inside(plate, x, y, radius)?;

    let bottom_z = plate.origin.z;
    let wall_surface = Surface::Cylinder(Cylinder::new(Point3d::new(x, y, bottom_z), Vec3::Z, radius));
    let (wall, wall_outer) = new_face(store, plate.shell, wall_surface, false, 2.0 * PI * radius * plate.thickness);
    let wall_inner = new_inner_loop(store, wall);

    let top_circle = Circle3d::new(Point3d::new(x, y, plate.top_z()), Vec3::Z, Vec3::X, radius);
    let top_loop = new_inner_loop(store, plate.top);
    let top_edge = circular_edge(store, top_circle, (top_loop, false), (wall_outer, true));

    let bottom_circle = Circle3d::new(Point3d::new(x, y, bottom_z), -Vec3::Z, Vec3::X, radius);
    let bottom_loop = new_inner_loop(store, plate.bottom);
    let bottom_edge = circular_edge(store, bottom_circle, (bottom_loop, false), (wall_inner, true));

    let disc = PI * radius * radius;
    store.faces[plate.top].area -= disc;
    store.faces[plate.bottom].area -= disc;
    debug!(x, y, radius, "punched through hole");

    Ok(HoleFeature {
        wall,
        top_edge,
        bottom_edge,
    })
}

/// Cut a blind round pocket of the given depth into the top face.
#[instrument(skip(store, plate))]
pub fn cut_pocket(
    store: &mut EntityStore,
    plate: &Plate,
    x: f64,
    y: f64,
    radius: f64,
    depth: f64,
) -> Result<PocketFeature, PrimitiveError> {
    require_positive("radius", radius)?;
    require_positive("depth", depth)?;
    if depth >= plate.thickness {
        return Err(PrimitiveError::InvalidDimension { name: "depth", value: depth });
    }
    check_inside(plate, x, y, radius)?;

    let top_z = plate.top_z();
    let floor_z = top_z - depth;
    let wall_surface = Surface::Cylinder(Cylinder::new(Point3d::new(x, y, floor_z), Vec3::Z, radius));
    let (wall, wall_outer) = new_face(store, plate.shell, wall_surface, false, 2.0 * PI * radius * depth);
    let wall_inner = new_inner_loop(store, wall);

    let floor_center = Point3d::new(x, y, floor_z);
    let disc = PI * radius * radius;
    let (floor, floor_loop) = new_face(store, plate.shell, Surface::Plane(Plane::new(floor_center, Vec3::Z)), true, disc);

    let rim_circle = Circle3d::new(Point3d::new(x, y, top_z), Vec3::Z, Vec3::X, radius);
    let rim_loop = new_inner_loop(store, plate.top);
    let rim_edge = circular_edge(store, rim_circle, (rim_loop, false), (wall_outer, true));

    let floor_circle = Circle3d::new(floor_center, Vec3::Z, Vec3::X, radius);
    let floor_edge = circular_edge(store, floor_circle, (floor_loop, true), (wall_inner, false));

    store.faces[plate.top].area -= disc;
    debug!(x, y, radius, depth, "cut pocket");

    Ok(PocketFeature {
        wall,
        floor,
        rim_edge,
        floor_edge,
    })
}

/// Add a round boss standing `height` above the top face.
#[instrument(skip(store, plate))]
pub fn add_boss(
    store: &mut EntityStore,
    plate: &Plate,
    x: f64,
    y: f64,
    radius: f64,
    height: f64,
) -> Result<BossFeature, PrimitiveError> {
    require_positive("radius", radius)?;
    require_positive("height", height)?;
    check_inside(plate, x, y, radius)?;

    let top_z = plate.top_z();
    let cap_z = top_z + height;
    let wall_surface = Surface::Cylinder(Cylinder::new(Point3d::new(x, y, top_z), Vec3::Z, radius));
    let (wall, wall_outer) = new_face(store, plate.shell, wall_surface, true, 2.0 * PI * radius * height);
    let wall_inner = new_inner_loop(store, wall);

    let cap_center = Point3d::new(x, y, cap_z);
    let disc = PI * radius * radius;
    let (cap, cap_loop) = new_face(store, plate.shell, Surface::Plane(Plane::new(cap_center, Vec3::Z)), true, disc);

    let base_circle = Circle3d::new(Point3d::new(x, y, top_z), Vec3::Z, Vec3::X, radius);
    let base_loop = new_inner_loop(store, plate.top);
    let base_edge = circular_edge(store, base_circle, (base_loop, false), (wall_outer, true));

    let cap_circle = Circle3d::new(cap_center, Vec3::Z, Vec3::X, radius);
    let cap_edge = circular_edge(store, cap_circle, (cap_loop, true), (wall_inner, false));

    store.faces[plate.top].area -= disc;
    debug!(x, y, radius, height, "added boss");

    Ok(BossFeature {
        wall,
        cap,
        base_edge,
        cap_edge,
    })
}

fn check_inside(plate: &Plate, x: f64, y: f64, radius: f64) -> Result<(), PrimitiveError> {
    let inside = x - radius > plate.origin.x
        && x + radius < plate.origin.x + plate.width
        && y - radius > plate.origin.y
        && y + radius < plate.origin.y + plate.height;
    if inside {
        Ok(())
    } else {
        Err(PrimitiveError::OutsidePlate { x, y, radius })
    }
}

fn new_face(
    store: &mut EntityStore,
    shell_id: ShellId,
    surface: Surface,
    same_sense: bool,
    area: f64,
) -> (FaceId, LoopId) {
    let loop_id = store.loops.insert(Loop {
        half_edges: vec![],
        face: FaceId::default(),
    });
    let face_id = store.faces.insert(Face {
        surface,
        outer_loop: loop_id,
        inner_loops: vec![],
        same_sense,
        shell: shell_id,
        area,
    });
    store.loops[loop_id].face = face_id;
    store.shells[shell_id].faces.push(face_id);
    (face_id, loop_id)
}

fn new_inner_loop(store: &mut EntityStore, face_id: FaceId) -> LoopId {
    let loop_id = store.loops.insert(Loop {
        half_edges: vec![],
        face: face_id,
    });
    store.faces[face_id].inner_loops.push(loop_id);
    loop_id
}

/// Closed circular edge with a single seam vertex, used by the two given
/// loops with the given directions.
fn circular_edge(
    store: &mut EntityStore,
    circle: Circle3d,
    (loop_a, forward_a): (LoopId, bool),
    (loop_b, forward_b): (LoopId, bool),
) -> EdgeId {
    let seam = store.vertices.insert(Vertex {
        point: circle.evaluate(0.0),
    });
    let edge_id = store.edges.insert(Edge {
        curve: Curve::Circle(circle),
        half_edges: (HalfEdgeId::default(), HalfEdgeId::default()),
        start_vertex: seam,
        end_vertex: seam,
    });
    let a = attach_half_edge(store, edge_id, loop_a, forward_a, 2.0 * PI);
    let b = attach_half_edge(store, edge_id, loop_b, forward_b, 2.0 * PI);
    link_twins(store, edge_id, a, b);
    edge_id
}

fn attach_half_edge(
    store: &mut EntityStore,
    edge_id: EdgeId,
    loop_id: LoopId,
    forward: bool,
    t_end: f64,
) -> HalfEdgeId {
    let edge = &store.edges[edge_id];
    let (start_vertex, end_vertex) = if forward {
        (edge.start_vertex, edge.end_vertex)
    } else {
        (edge.end_vertex, edge.start_vertex)
    };
    let he_id = store.half_edges.insert(HalfEdge {
        edge: edge_id,
        twin: HalfEdgeId::default(),
        face: store.loops[loop_id].face,
        loop_id,
        start_vertex,
        end_vertex,
        t_start: 0.0,
        t_end,
        forward,
    });
    store.loops[loop_id].half_edges.push(he_id);
    he_id
}

fn link_twins(store: &mut EntityStore, edge_id: EdgeId, a: HalfEdgeId, b: HalfEdgeId) {
    store.half_edges[a].twin = b;
    store.half_edges[b].twin = a;
    store.edges[edge_id].half_edges = (a, b);
}
