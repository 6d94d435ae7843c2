use std::collections::HashSet;

use sheet_kernel::geometry::curves::Curve;
use sheet_kernel::geometry::surfaces::Surface;
use sheet_kernel::topology::brep::*;
use sheet_kernel::{Point3d, Transform, Vec3};
use slotmap::SlotMap;
use tracing::debug;

use crate::handle::*;
use crate::ledger::{HandleLedger, LedgerStats};
use crate::traits::{SceneGraph, SelectionAccumulator};
use crate::types::*;
use crate::view::{DrawingView, ViewId};

/// What a live handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entity {
    Face(FaceId),
    Loop(LoopId),
    CoEdge(HalfEdgeId),
    Edge(EdgeId),
    Curve(EdgeId),
    Surface(FaceId),
    View(ViewId),
    ViewTransform(ViewId),
}

impl Entity {
    fn kind_name(&self) -> &'static str {
        match self {
            Entity::Face(_) => "face",
            Entity::Loop(_) => "loop",
            Entity::CoEdge(_) => "co-edge",
            Entity::Edge(_) => "edge",
            Entity::Curve(_) => "curve",
            Entity::Surface(_) => "surface",
            Entity::View(_) => "view",
            Entity::ViewTransform(_) => "view transform",
        }
    }
}

/// In-memory scene graph over an arena B-rep plus a set of drawing views.
#[derive(Debug, Default)]
pub struct BrepScene {
    store: EntityStore,
    views: SlotMap<ViewId, DrawingView>,
    ledger: HandleLedger<Entity>,
}

impl BrepScene {
    pub fn new(store: EntityStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    pub fn add_view(&mut self, view: DrawingView) -> ViewId {
        debug!(name = %view.name, "adding drawing view");
        self.views.insert(view)
    }

    pub fn view(&self, id: ViewId) -> Option<&DrawingView> {
        self.views.get(id)
    }

    pub fn ledger_stats(&self) -> LedgerStats {
        self.ledger.stats()
    }

    pub fn live_handles(&self) -> usize {
        self.ledger.live_count()
    }

    /// Start an empty selection that records edge ids.
    pub fn selection(&self) -> EdgeSelection<'_> {
        EdgeSelection {
            scene: self,
            edges: Vec::new(),
        }
    }

    pub fn edge_id(&self, edge: &EdgeHandle<'_>) -> Result<EdgeId, SceneError> {
        let id = self.lookup(edge.id(), "edge", |e| match e {
            Entity::Edge(id) => Some(id),
            _ => None,
        })?;
        self.edge(id, edge.id())?;
        Ok(id)
    }

    pub fn face_id(&self, face: &FaceHandle<'_>) -> Result<FaceId, SceneError> {
        let id = self.lookup(face.id(), "face", |e| match e {
            Entity::Face(id) => Some(id),
            _ => None,
        })?;
        self.face(id, face.id())?;
        Ok(id)
    }

    pub fn view_id(&self, view: &ViewHandle<'_>) -> Result<ViewId, SceneError> {
        self.lookup(view.id(), "view", |e| match e {
            Entity::View(id) => Some(id),
            _ => None,
        })
    }

    fn acquire<K>(&self, entity: Entity) -> Handle<'_, K> {
        Handle::new(self.ledger.acquire(entity), self)
    }

    fn lookup<T>(
        &self,
        id: HandleId,
        expected: &'static str,
        pick: impl Fn(Entity) -> Option<T>,
    ) -> Result<T, SceneError> {
        let entity = self.ledger.resolve(id).ok_or(SceneError::StaleHandle { id })?;
        pick(entity).ok_or(SceneError::WrongKind {
            id,
            expected,
            found: entity.kind_name(),
        })
    }

    fn face(&self, id: FaceId, handle: HandleId) -> Result<&Face, SceneError> {
        self.store.faces.get(id).ok_or(SceneError::EntityNotFound { id: handle })
    }

    fn edge(&self, id: EdgeId, handle: HandleId) -> Result<&Edge, SceneError> {
        self.store.edges.get(id).ok_or(SceneError::EntityNotFound { id: handle })
    }

    fn half_edge(&self, id: HalfEdgeId, handle: HandleId) -> Result<&HalfEdge, SceneError> {
        self.store.half_edges.get(id).ok_or(SceneError::EntityNotFound { id: handle })
    }

    fn loop_data(&self, id: LoopId, handle: HandleId) -> Result<&Loop, SceneError> {
        self.store.loops.get(id).ok_or(SceneError::EntityNotFound { id: handle })
    }

    fn drawing_view(&self, id: ViewId, handle: HandleId) -> Result<&DrawingView, SceneError> {
        self.views.get(id).ok_or(SceneError::EntityNotFound { id: handle })
    }

    fn loop_of(&self, lp: &LoopHandle<'_>) -> Result<(LoopId, &Loop), SceneError> {
        let id = self.lookup(lp.id(), "loop", |e| match e {
            Entity::Loop(id) => Some(id),
            _ => None,
        })?;
        Ok((id, self.loop_data(id, lp.id())?))
    }

    fn half_edge_of(&self, coedge: &CoEdgeHandle<'_>) -> Result<&HalfEdge, SceneError> {
        let id = self.lookup(coedge.id(), "co-edge", |e| match e {
            Entity::CoEdge(id) => Some(id),
            _ => None,
        })?;
        self.half_edge(id, coedge.id())
    }

    fn curve_of(&self, curve: &CurveHandle<'_>) -> Result<&Curve, SceneError> {
        let id = self.lookup(curve.id(), "curve", |e| match e {
            Entity::Curve(id) => Some(id),
            _ => None,
        })?;
        Ok(&self.edge(id, curve.id())?.curve)
    }

    fn surface_of(&self, surface: &SurfaceHandle<'_>) -> Result<&Surface, SceneError> {
        let id = self.lookup(surface.id(), "surface", |e| match e {
            Entity::Surface(id) => Some(id),
            _ => None,
        })?;
        Ok(&self.face(id, surface.id())?.surface)
    }

    fn view_of(&self, view: &ViewHandle<'_>) -> Result<&DrawingView, SceneError> {
        let id = self.view_id(view)?;
        self.drawing_view(id, view.id())
    }

    fn visible_face_ids(&self, view: &DrawingView) -> Vec<FaceId> {
        self.store
            .faces
            .iter()
            .filter_map(|(id, face)| match &face.surface {
                Surface::Plane(plane) => {
                    let normal = if face.same_sense { plane.normal } else { -plane.normal };
                    view.faces_viewer(&normal).then_some(id)
                }
                _ => None,
            })
            .collect()
    }
}

impl Release for BrepScene {
    fn release(&self, id: HandleId) {
        self.ledger.release(id);
    }
}

impl SceneGraph for BrepScene {
    fn drawing_views(&self) -> Vec<ViewHandle<'_>> {
        self.views.keys().map(|id| self.acquire(Entity::View(id))).collect()
    }

    fn visible_faces(&self, view: &ViewHandle<'_>) -> Result<Vec<FaceHandle<'_>>, SceneError> {
        let view = self.view_of(view)?;
        Ok(self
            .visible_face_ids(view)
            .into_iter()
            .map(|id| self.acquire(Entity::Face(id)))
            .collect())
    }

    fn visible_edges(&self, view: &ViewHandle<'_>) -> Result<Vec<EdgeHandle<'_>>, SceneError> {
        let view = self.view_of(view)?;
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for face_id in self.visible_face_ids(view) {
            for edge_id in self.store.face_edges(face_id) {
                if !seen.insert(edge_id) {
                    continue;
                }
                if let Curve::Line(line) = &self.store.edges[edge_id].curve {
                    if view.is_end_on(&line.direction) {
                        continue;
                    }
                }
                edges.push(self.acquire(Entity::Edge(edge_id)));
            }
        }
        Ok(edges)
    }

    fn face_loops(&self, face: &FaceHandle<'_>) -> Result<Vec<LoopHandle<'_>>, SceneError> {
        let id = self.face_id(face)?;
        Ok(self
            .store
            .face_loops(id)
            .into_iter()
            .map(|lp| self.acquire(Entity::Loop(lp)))
            .collect())
    }

    fn loop_is_outer(&self, lp: &LoopHandle<'_>) -> Result<bool, SceneError> {
        let (id, data) = self.loop_of(lp)?;
        Ok(self.face(data.face, lp.id())?.outer_loop == id)
    }

    fn loop_edge_count(&self, lp: &LoopHandle<'_>) -> Result<usize, SceneError> {
        Ok(self.loop_of(lp)?.1.half_edges.len())
    }

    fn loop_first_coedge(&self, lp: &LoopHandle<'_>) -> Result<CoEdgeHandle<'_>, SceneError> {
        let (_, data) = self.loop_of(lp)?;
        let first = data.half_edges.first().ok_or(SceneError::EmptyLoop { id: lp.id() })?;
        Ok(self.acquire(Entity::CoEdge(*first)))
    }

    fn loop_edges(&self, lp: &LoopHandle<'_>) -> Result<Vec<EdgeHandle<'_>>, SceneError> {
        let (_, data) = self.loop_of(lp)?;
        let mut edges = Vec::with_capacity(data.half_edges.len());
        for &he in &data.half_edges {
            let edge = self.half_edge(he, lp.id())?.edge;
            edges.push(self.acquire(Entity::Edge(edge)));
        }
        Ok(edges)
    }

    fn loop_face(&self, lp: &LoopHandle<'_>) -> Result<FaceHandle<'_>, SceneError> {
        let (_, data) = self.loop_of(lp)?;
        Ok(self.acquire(Entity::Face(data.face)))
    }

    fn coedge_partner(&self, coedge: &CoEdgeHandle<'_>) -> Result<CoEdgeHandle<'_>, SceneError> {
        let twin = self.half_edge_of(coedge)?.twin;
        self.half_edge(twin, coedge.id())?;
        Ok(self.acquire(Entity::CoEdge(twin)))
    }

    fn coedge_curve_params(&self, coedge: &CoEdgeHandle<'_>) -> Result<ParamRange, SceneError> {
        let he = self.half_edge_of(coedge)?;
        Ok(ParamRange {
            t_start: he.t_start,
            t_end: he.t_end,
        })
    }

    fn coedge_evaluate(&self, coedge: &CoEdgeHandle<'_>, t: f64) -> Result<CoEdgePoint, SceneError> {
        let he = self.half_edge_of(coedge)?;
        let curve = &self.edge(he.edge, coedge.id())?.curve;
        let tangent = curve.derivative(t).unit();
        Ok(CoEdgePoint {
            point: curve.evaluate(t),
            tangent: if he.forward { tangent } else { -tangent },
        })
    }

    fn coedge_loop(&self, coedge: &CoEdgeHandle<'_>) -> Result<LoopHandle<'_>, SceneError> {
        let he = self.half_edge_of(coedge)?;
        Ok(self.acquire(Entity::Loop(he.loop_id)))
    }

    fn edge_curve(&self, edge: &EdgeHandle<'_>) -> Result<CurveHandle<'_>, SceneError> {
        let id = self.edge_id(edge)?;
        Ok(self.acquire(Entity::Curve(id)))
    }

    fn curve_kind(&self, curve: &CurveHandle<'_>) -> Result<CurveKind, SceneError> {
        Ok(match self.curve_of(curve)? {
            Curve::Line(_) => CurveKind::Line,
            Curve::Circle(_) => CurveKind::Circle,
            Curve::Ellipse(_) => CurveKind::Other,
        })
    }

    fn circle_params(&self, curve: &CurveHandle<'_>) -> Result<CircleParams, SceneError> {
        match self.curve_of(curve)? {
            Curve::Circle(c) => Ok(CircleParams {
                center: c.center,
                axis: c.normal,
                radius: c.radius,
            }),
            other => Err(SceneError::UnsupportedQuery {
                query: "circle_params",
                reason: format!("curve is a {}", other.kind_name()),
            }),
        }
    }

    fn line_params(&self, curve: &CurveHandle<'_>) -> Result<LineParams, SceneError> {
        match self.curve_of(curve)? {
            Curve::Line(l) => Ok(LineParams {
                origin: l.origin,
                direction: l.direction,
            }),
            other => Err(SceneError::UnsupportedQuery {
                query: "line_params",
                reason: format!("curve is a {}", other.kind_name()),
            }),
        }
    }

    fn face_surface(&self, face: &FaceHandle<'_>) -> Result<SurfaceHandle<'_>, SceneError> {
        let id = self.face_id(face)?;
        Ok(self.acquire(Entity::Surface(id)))
    }

    fn surface_normal_at(&self, surface: &SurfaceHandle<'_>, point: &Point3d) -> Result<Vec3, SceneError> {
        Ok(self.surface_of(surface)?.normal_at_point(point))
    }

    fn face_area(&self, face: &FaceHandle<'_>) -> Result<f64, SceneError> {
        let id = self.face_id(face)?;
        Ok(self.face(id, face.id())?.area)
    }

    fn face_box(&self, face: &FaceHandle<'_>) -> Result<[f64; 6], SceneError> {
        let id = self.face_id(face)?;
        Ok(self.store.face_bounding_box(id).to_corner_array())
    }

    fn face_sense_reversed(&self, face: &FaceHandle<'_>) -> Result<bool, SceneError> {
        let id = self.face_id(face)?;
        Ok(!self.face(id, face.id())?.same_sense)
    }

    fn model_to_view_transform(&self, view: &ViewHandle<'_>) -> Result<ViewTransformHandle<'_>, SceneError> {
        let id = self.view_id(view)?;
        self.drawing_view(id, view.id())?;
        Ok(self.acquire(Entity::ViewTransform(id)))
    }

    fn transform_data(&self, transform: &ViewTransformHandle<'_>) -> Result<Transform, SceneError> {
        let id = self.lookup(transform.id(), "view transform", |e| match e {
            Entity::ViewTransform(id) => Some(id),
            _ => None,
        })?;
        Ok(self.drawing_view(id, transform.id())?.transform)
    }
}

/// Selection over a [`BrepScene`] that records the selected edge ids in order.
#[derive(Debug)]
pub struct EdgeSelection<'s> {
    scene: &'s BrepScene,
    edges: Vec<EdgeId>,
}

impl EdgeSelection<'_> {
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl SelectionAccumulator for EdgeSelection<'_> {
    fn add_edge(&mut self, edge: &EdgeHandle<'_>) -> Result<(), SceneError> {
        let id = self.scene.edge_id(edge)?;
        self.edges.push(id);
        Ok(())
    }
}
