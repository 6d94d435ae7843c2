use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};
use sheet_kernel::{Transform, Vec3};
use slotmap::new_key_type;

new_key_type! {
    pub struct ViewId;
}

/// Normals and directions shorter than this in the relevant sheet component
/// count as perpendicular to the sheet.
const FACING_TOLERANCE: f64 = 1e-9;

/// A projected view of the model placed on a drawing sheet. Sheet x/y lie in
/// the drawing plane; sheet +z points at the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingView {
    pub name: String,
    /// Model-to-sheet transform.
    pub transform: Transform,
}

impl DrawingView {
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
        }
    }

    /// Looking down -Z: model x/y map onto sheet x/y.
    pub fn top(scale: f64, sheet_x: f64, sheet_y: f64) -> Self {
        Self::new("Top", Transform::drawing_view(Transform::identity(), scale, sheet_x, sheet_y))
    }

    /// Looking along +Y: model x stays sheet x, model z becomes sheet y.
    pub fn front(scale: f64, sheet_x: f64, sheet_y: f64) -> Self {
        Self::new(
            "Front",
            Transform::drawing_view(Transform::rotation_x(-FRAC_PI_2), scale, sheet_x, sheet_y),
        )
    }

    /// Looking along -X: model y becomes sheet x, model z becomes sheet y.
    pub fn right(scale: f64, sheet_x: f64, sheet_y: f64) -> Self {
        let orientation = Transform::rotation_y(-FRAC_PI_2).then(&Transform::rotation_x(-FRAC_PI_2));
        Self::new("Right", Transform::drawing_view(orientation, scale, sheet_x, sheet_y))
    }

    /// True when an outward face normal points at the viewer.
    pub fn faces_viewer(&self, normal: &Vec3) -> bool {
        self.transform.transform_vector(normal).unit().z > FACING_TOLERANCE
    }

    /// True when a model direction projects to (almost) a point on the sheet.
    pub fn is_end_on(&self, direction: &Vec3) -> bool {
        let d = self.transform.transform_vector(direction).unit();
        (d.x * d.x + d.y * d.y).sqrt() < FACING_TOLERANCE
    }
}
