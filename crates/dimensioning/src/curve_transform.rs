//! Model-to-sheet mapping of line positions and directions, with the
//! floating-point noise of the view rotation scrubbed out.

use sheet_kernel::{Point3d, Transform, Vec3};
use tracing::warn;

/// Decimal places kept in sheet coordinates.
pub const SHEET_DECIMALS: i32 = 8;
/// Position components smaller than this become exactly zero.
pub const POSITION_SNAP: f64 = 1e-10;
/// Direction components smaller than this become exactly zero.
pub const DIRECTION_SNAP: f64 = 1e-15;

/// Round to `decimals` places, halves to even.
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

fn clean(value: f64, snap: f64) -> f64 {
    let rounded = round_to_decimals(value, SHEET_DECIMALS);
    if rounded.abs() < snap {
        0.0
    } else {
        rounded
    }
}

/// Map a model position onto the sheet.
pub fn transform_point(view: &Transform, point: &Point3d) -> Point3d {
    let p = view.transform_point(point);
    Point3d::new(
        clean(p.x, POSITION_SNAP),
        clean(p.y, POSITION_SNAP),
        clean(p.z, POSITION_SNAP),
    )
}

/// Map a model direction onto the sheet as a unit vector. A direction that
/// collapses to nothing is passed through unnormalized.
pub fn transform_direction(view: &Transform, direction: &Vec3) -> Vec3 {
    let mapped = view.transform_vector(direction);
    let d = match mapped.normalized() {
        Some(unit) => unit,
        None => {
            warn!(length = mapped.length(), "sheet direction too short to normalize");
            mapped
        }
    };
    Vec3::new(
        clean(d.x, DIRECTION_SNAP),
        clean(d.y, DIRECTION_SNAP),
        clean(d.z, DIRECTION_SNAP),
    )
}
