//! Property-based tests for the vector helpers and plate primitives.

use proptest::prelude::*;

use sheet_kernel::geometry::point::Point3d;
use sheet_kernel::geometry::transform::{box_indicates_thin_section, Transform};
use sheet_kernel::geometry::vector::{are_parallel, Vec3};
use sheet_kernel::topology::brep::{audit_solid, EntityStore};
use sheet_kernel::topology::primitives::{make_plate, punch_hole};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Vector whose magnitude is comfortably above the degenerate length.
fn arb_nonzero_vec() -> impl Strategy<Value = Vec3> {
    (-1000.0f64..1000.0, -1000.0f64..1000.0, -1000.0f64..1000.0)
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
        .prop_filter("magnitude above 1e-9", |v| v.length() > 1e-9)
}

/// Vector just above the degenerate length, magnitude in 1e-9..1e-6.
fn arb_small_vec() -> impl Strategy<Value = Vec3> {
    (arb_nonzero_vec(), 1e-9f64..1e-6).prop_map(|(dir, mag)| dir.unit() * mag)
}

/// Arbitrary positive dimension suitable for plate extents.
fn arb_positive_dim() -> impl Strategy<Value = f64> {
    0.01f64..10.0
}

/// Arbitrary rotation angle in radians.
fn arb_angle() -> impl Strategy<Value = f64> {
    -std::f64::consts::PI..std::f64::consts::PI
}

// ---------------------------------------------------------------------------
// 1. unit(v) has magnitude 1 for any non-degenerate v
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn unit_has_unit_magnitude(v in arb_nonzero_vec()) {
        let len = v.unit().length();
        prop_assert!((len - 1.0).abs() < 1e-9, "|unit(v)| = {}", len);
    }

    #[test]
    fn unit_of_small_vector_has_unit_magnitude(v in arb_small_vec()) {
        let len = v.unit().length();
        prop_assert!((len - 1.0).abs() < 1e-9, "|v| = {:e}, |unit(v)| = {}", v.length(), len);
    }
}

// ---------------------------------------------------------------------------
// 2. areParallel is reflexive and rejects the reversed vector
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn vector_parallel_to_itself(v in arb_nonzero_vec()) {
        prop_assert!(are_parallel(&v, &v));
    }

    #[test]
    fn vector_not_parallel_to_negation(v in arb_nonzero_vec()) {
        prop_assert!(!are_parallel(&v, &(-v)));
    }

    #[test]
    fn parallel_ignores_magnitude(v in arb_nonzero_vec(), s in 0.5f64..1000.0) {
        prop_assert!(are_parallel(&v, &(v * s)));
    }
}

// ---------------------------------------------------------------------------
// 3. Rotations preserve vector length
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn rotation_preserves_length(v in arb_nonzero_vec(), a in arb_angle()) {
        let t = Transform::rotation_x(a).then(&Transform::rotation_z(a));
        let r = t.transform_vector(&v);
        prop_assert!((r.length() - v.length()).abs() < 1e-9 * v.length().max(1.0));
    }
}

// ---------------------------------------------------------------------------
// 4. Thin-section detection depends only on the smallest extent
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn thin_box_detected_on_any_axis(
        axis in 0usize..3,
        thin in 0.0f64..0.0000999,
        big in 0.001f64..10.0,
    ) {
        let mut corners = [0.0, 0.0, 0.0, big, big, big];
        corners[axis + 3] = thin;
        prop_assert!(box_indicates_thin_section(&corners));
    }
}

// ---------------------------------------------------------------------------
// 5. Plates with a hole keep consistent twins
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn plate_with_hole_is_consistent(
        w in arb_positive_dim(),
        h in arb_positive_dim(),
        t in 0.0001f64..0.01,
    ) {
        let mut store = EntityStore::new();
        let plate = make_plate(&mut store, Point3d::ORIGIN, w, h, t).unwrap();
        let r = w.min(h) / 4.0;
        punch_hole(&mut store, &plate, w / 2.0, h / 2.0, r).unwrap();
        let audit = audit_solid(&store, plate.solid);
        prop_assert!(audit.all_valid(), "{:?}", audit.errors);
        prop_assert_eq!(store.edges.len(), 14);
    }
}
