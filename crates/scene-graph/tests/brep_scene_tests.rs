use approx::assert_relative_eq;
use scene_graph::*;
use sheet_kernel::geometry::curves::{Curve, Ellipse3d};
use sheet_kernel::topology::brep::EntityStore;
use sheet_kernel::topology::primitives::{make_plate, punch_hole, HoleFeature, Plate};
use sheet_kernel::{Point3d, Vec3};

fn plate_with_hole() -> (BrepScene, Plate, HoleFeature) {
    let mut store = EntityStore::new();
    let plate = make_plate(&mut store, Point3d::ORIGIN, 0.2, 0.1, 0.002).unwrap();
    let hole = punch_hole(&mut store, &plate, 0.05, 0.05, 0.003).unwrap();
    let mut scene = BrepScene::new(store);
    scene.add_view(DrawingView::top(1.0, 0.0, 0.0));
    scene.add_view(DrawingView::front(1.0, 0.0, 0.3));
    (scene, plate, hole)
}

#[test]
fn top_view_sees_only_the_top_face() {
    let (scene, plate, _) = plate_with_hole();
    {
        let views = scene.drawing_views();
        assert_eq!(views.len(), 2);
        let faces = scene.visible_faces(&views[0]).unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(scene.face_id(&faces[0]).unwrap(), plate.top);
    }
    assert_eq!(scene.live_handles(), 0);
}

#[test]
fn visible_edges_skip_end_on_lines() {
    let (scene, _, _) = plate_with_hole();
    let views = scene.drawing_views();
    // Top view: four outline lines plus the hole circle.
    assert_eq!(scene.visible_edges(&views[0]).unwrap().len(), 5);
    // Front view: the front face outline.
    assert_eq!(scene.visible_edges(&views[1]).unwrap().len(), 4);
}

#[test]
fn hole_loop_queries() {
    let (scene, plate, hole) = plate_with_hole();
    {
        let views = scene.drawing_views();
        let faces = scene.visible_faces(&views[0]).unwrap();
        let loops = scene.face_loops(&faces[0]).unwrap();
        assert_eq!(loops.len(), 2);
        assert!(scene.loop_is_outer(&loops[0]).unwrap());
        assert!(!scene.loop_is_outer(&loops[1]).unwrap());
        assert_eq!(scene.loop_edge_count(&loops[0]).unwrap(), 4);
        assert_eq!(scene.loop_edge_count(&loops[1]).unwrap(), 1);

        let coedge = scene.loop_first_coedge(&loops[1]).unwrap();
        let partner = scene.coedge_partner(&coedge).unwrap();
        let wall_loop = scene.coedge_loop(&partner).unwrap();
        let wall = scene.loop_face(&wall_loop).unwrap();
        assert_eq!(scene.face_id(&wall).unwrap(), hole.wall);
        assert!(scene.face_sense_reversed(&wall).unwrap());
        assert_relative_eq!(scene.face_area(&wall).unwrap(), 2.0 * std::f64::consts::PI * 0.003 * 0.002);

        let back = scene.loop_face(&loops[1]).unwrap();
        assert_eq!(scene.face_id(&back).unwrap(), plate.top);

        let edges = scene.loop_edges(&loops[1]).unwrap();
        let curve = scene.edge_curve(&edges[0]).unwrap();
        assert_eq!(scene.curve_kind(&curve).unwrap(), CurveKind::Circle);
        let circle = scene.circle_params(&curve).unwrap();
        assert_relative_eq!(circle.radius, 0.003);
        assert!(matches!(
            scene.line_params(&curve),
            Err(SceneError::UnsupportedQuery { query: "line_params", .. })
        ));
    }
    let stats = scene.ledger_stats();
    assert_eq!(stats.live(), 0);
    assert_eq!(stats.double_released, 0);
}

#[test]
fn coedge_tangent_follows_travel_direction() {
    let (scene, _, _) = plate_with_hole();
    let views = scene.drawing_views();
    let faces = scene.visible_faces(&views[0]).unwrap();
    let loops = scene.face_loops(&faces[0]).unwrap();
    let coedge = scene.loop_first_coedge(&loops[1]).unwrap();
    let partner = scene.coedge_partner(&coedge).unwrap();

    let range = scene.coedge_curve_params(&coedge).unwrap();
    let mid = range.mid();
    let here = scene.coedge_evaluate(&coedge, mid).unwrap();
    let there = scene.coedge_evaluate(&partner, mid).unwrap();
    assert_relative_eq!(here.point.x, there.point.x);
    assert_relative_eq!(here.tangent.dot(&there.tangent), -1.0, epsilon = 1e-12);
    // Inner loops run clockwise about the face normal.
    let radial = here.point - Point3d::new(0.05, 0.05, here.point.z);
    assert!(radial.cross(&here.tangent).dot(&Vec3::Z) < 0.0);
}

#[test]
fn surface_normal_ignores_face_sense() {
    let (scene, _, _) = plate_with_hole();
    let views = scene.drawing_views();
    let faces = scene.visible_faces(&views[0]).unwrap();
    let loops = scene.face_loops(&faces[0]).unwrap();
    let coedge = scene.loop_first_coedge(&loops[1]).unwrap();
    let partner = scene.coedge_partner(&coedge).unwrap();
    let wall_loop = scene.coedge_loop(&partner).unwrap();
    let wall = scene.loop_face(&wall_loop).unwrap();
    let surface = scene.face_surface(&wall).unwrap();

    let n = scene.surface_normal_at(&surface, &Point3d::new(0.053, 0.05, 0.001)).unwrap();
    assert_relative_eq!(n.x, 1.0, epsilon = 1e-12);
    let bb = scene.face_box(&wall).unwrap();
    assert_relative_eq!(bb[5] - bb[2], 0.002, epsilon = 1e-12);
}

#[test]
fn non_circular_curve_kind() {
    let (mut scene, _, hole) = plate_with_hole();
    scene.store_mut().edges[hole.top_edge].curve = Curve::Ellipse(Ellipse3d::new(
        Point3d::new(0.05, 0.05, 0.002),
        Vec3::Z,
        Vec3::X,
        0.004,
        0.003,
    ));
    let views = scene.drawing_views();
    let edges = scene.visible_edges(&views[0]).unwrap();
    let kinds: Vec<CurveKind> = edges
        .iter()
        .map(|e| scene.curve_kind(&scene.edge_curve(e).unwrap()).unwrap())
        .collect();
    assert!(kinds.contains(&CurveKind::Other));
    assert!(!kinds.contains(&CurveKind::Circle));
}

#[test]
fn view_transform_data() {
    let (scene, _, _) = plate_with_hole();
    let views = scene.drawing_views();
    let t = scene.model_to_view_transform(&views[1]).unwrap();
    let data = scene.transform_data(&t).unwrap();
    let p = data.transform_point(&Point3d::new(0.1, 0.0, 0.002));
    assert_relative_eq!(p.y, 0.302, epsilon = 1e-12);
}

#[test]
fn wrong_kind_and_stale_handles_are_errors() {
    let (scene, _, _) = plate_with_hole();
    let other = plate_with_hole().0;
    let views = scene.drawing_views();
    let foreign = other.drawing_views();
    assert!(matches!(
        scene.visible_faces(&foreign[0]),
        Err(SceneError::StaleHandle { .. })
    ));

    let faces = scene.visible_faces(&views[0]).unwrap();
    let forged: EdgeHandle<'_> = Handle::new(faces[0].id(), &scene);
    let err = scene.edge_curve(&forged).unwrap_err();
    assert!(matches!(err, SceneError::WrongKind { expected: "edge", found: "face", .. }));
    // The forged handle shares an id with a real one, so one release misses.
    drop(forged);
    drop(faces);
    assert_eq!(scene.ledger_stats().double_released, 1);
}

#[test]
fn selection_records_edges() {
    let (scene, _, hole) = plate_with_hole();
    let views = scene.drawing_views();
    let edges = scene.visible_edges(&views[0]).unwrap();
    let mut selection = scene.selection();
    for e in &edges {
        if scene.edge_id(e).unwrap() == hole.top_edge {
            selection.add_edge(e).unwrap();
        }
    }
    assert_eq!(selection.edges(), &[hole.top_edge]);
}
