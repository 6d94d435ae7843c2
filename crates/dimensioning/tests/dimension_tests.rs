use approx::assert_relative_eq;
use dimensioning::*;
use scene_graph::{BrepScene, DrawingView, SceneGraph};
use sheet_kernel::geometry::curves::{Curve, Ellipse3d};
use sheet_kernel::topology::brep::EntityStore;
use sheet_kernel::topology::primitives::{make_plate, punch_hole};
use sheet_kernel::{Point3d, Vec3};

const WIDTH: f64 = 0.2;
const HEIGHT: f64 = 0.1;
const THICKNESS: f64 = 0.002;

/// A drilled plate drawn in top, front and right views.
fn drawing() -> BrepScene {
    let mut store = EntityStore::new();
    let plate = make_plate(&mut store, Point3d::ORIGIN, WIDTH, HEIGHT, THICKNESS).unwrap();
    punch_hole(&mut store, &plate, 0.05, 0.05, 0.003).unwrap();
    let mut scene = BrepScene::new(store);
    scene.add_view(DrawingView::top(1.0, 0.0, 0.0));
    scene.add_view(DrawingView::front(1.0, 0.0, 0.3));
    scene.add_view(DrawingView::right(1.0, 0.4, 0.0));
    scene
}

#[test]
fn top_view_edges_skip_the_hole() {
    let scene = drawing();
    {
        let views = scene.drawing_views();
        let edges = extract_straight_edges(&scene, &views[0]).unwrap();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges.iter().filter(|e| e.is_vertical()).count(), 2);
        for e in &edges {
            assert_relative_eq!((e.dx * e.dx + e.dy * e.dy + e.dz * e.dz).sqrt(), 1.0, epsilon = 1e-9);
            assert_eq!(e.dz, 0.0);
        }
    }
    assert_eq!(scene.live_handles(), 0);
}

#[test]
fn front_view_maps_thickness_onto_sheet_y() {
    let scene = drawing();
    let views = scene.drawing_views();
    let solver = BoundarySolver::new(extract_straight_edges(&scene, &views[1]).unwrap()).unwrap();
    let bounds = solver.bounds();
    assert_relative_eq!(bounds.x_min, 0.0);
    assert_relative_eq!(bounds.x_max, WIDTH);
    assert_relative_eq!(bounds.y_min, 0.3);
    assert_relative_eq!(bounds.y_max, 0.3 + THICKNESS, epsilon = 1e-12);
}

#[test]
fn right_view_maps_plate_depth_onto_sheet_x() {
    let scene = drawing();
    let views = scene.drawing_views();
    let solver = BoundarySolver::new(extract_straight_edges(&scene, &views[2]).unwrap()).unwrap();
    let bounds = solver.bounds();
    assert_relative_eq!(bounds.width(), HEIGHT, epsilon = 1e-12);
    assert_relative_eq!(bounds.height(), THICKNESS, epsilon = 1e-12);
}

#[test]
fn dimensions_whole_drawing() {
    let scene = drawing();
    let mut sink = RecordingSink::default();
    let summary = {
        let views = scene.drawing_views();
        dimension_views(&scene, &views, &mut sink, &DimensionConfig::default()).unwrap()
    };

    assert_eq!(summary.views, 3);
    assert_eq!(summary.dimensions, 3);
    assert_relative_eq!(summary.offset, HEIGHT / 5.0, epsilon = 1e-12);

    let placed = &sink.placed;
    assert_eq!(placed[0].axis, DimensionAxis::Horizontal);
    assert_relative_eq!(placed[0].at.x, WIDTH / 2.0, epsilon = 1e-12);
    assert_relative_eq!(placed[0].at.y, HEIGHT + 0.02, epsilon = 1e-12);
    assert_relative_eq!(placed[0].first.x, 0.0);
    assert_relative_eq!(placed[0].second.x, WIDTH);

    assert_eq!(placed[1].axis, DimensionAxis::Vertical);
    assert_relative_eq!(placed[1].at.x, -0.02, epsilon = 1e-12);
    assert_relative_eq!(placed[1].at.y, HEIGHT / 2.0, epsilon = 1e-12);

    // The front view reuses the top view's offset.
    assert_eq!(placed[2].axis, DimensionAxis::Horizontal);
    assert_eq!(placed[2].tolerance, ToleranceStyle::Symmetric);
    assert_relative_eq!(placed[2].at.x, WIDTH / 2.0 + 0.02125, epsilon = 1e-12);
    assert_relative_eq!(placed[2].at.y, 0.3 + THICKNESS + 0.02, epsilon = 1e-12);

    let stats = scene.ledger_stats();
    assert_eq!(stats.live(), 0);
    assert_eq!(stats.double_released, 0);
}

#[test]
fn no_views_is_an_error() {
    let scene = drawing();
    let mut sink = RecordingSink::default();
    let err = dimension_views(&scene, &[], &mut sink, &DimensionConfig::default()).unwrap_err();
    assert!(matches!(err, DimensionError::NoViews));
}

#[test]
fn view_without_straight_edges_is_an_error() {
    let mut scene = BrepScene::new(EntityStore::new());
    scene.add_view(DrawingView::top(1.0, 0.0, 0.0));
    {
        let views = scene.drawing_views();
        let err = extract_straight_edges(&scene, &views[0]).unwrap_err();
        assert!(matches!(err, DimensionError::NoStraightEdges { .. }));

        let mut sink = RecordingSink::default();
        assert!(dimension_views(&scene, &views, &mut sink, &DimensionConfig::default()).is_err());
        assert!(sink.placed.is_empty());
    }
    assert_eq!(scene.live_handles(), 0);
}

#[test]
fn view_with_only_curved_edges_is_an_error() {
    let mut store = EntityStore::new();
    let plate = make_plate(&mut store, Point3d::ORIGIN, WIDTH, HEIGHT, THICKNESS).unwrap();
    punch_hole(&mut store, &plate, 0.05, 0.05, 0.003).unwrap();
    for edge in store.edges.values_mut() {
        let origin = match &edge.curve {
            Curve::Line(line) => line.origin,
            _ => continue,
        };
        edge.curve = Curve::Ellipse(Ellipse3d::new(origin, Vec3::Z, Vec3::X, 0.01, 0.005));
    }
    let mut scene = BrepScene::new(store);
    scene.add_view(DrawingView::top(1.0, 0.0, 0.0));
    {
        let views = scene.drawing_views();
        let err = extract_straight_edges(&scene, &views[0]).unwrap_err();
        assert!(matches!(err, DimensionError::NoStraightEdges { .. }));
        assert_eq!(scene.live_handles(), 1);
    }
    assert_eq!(scene.live_handles(), 0);
    assert_eq!(scene.ledger_stats().double_released, 0);
}
