use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;

/// An affine map: a 3x3 linear part followed by a translation.
///
/// `linear` is row-major, so `linear[r]` dotted with a vector gives the
/// r-th component of its image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub linear: [[f64; 3]; 3],
    pub offset: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            linear: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            offset: Vec3::ZERO,
        }
    }

    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            offset: Vec3::new(dx, dy, dz),
            ..Self::identity()
        }
    }

    pub fn uniform_scaling(s: f64) -> Self {
        Self {
            linear: [[s, 0.0, 0.0], [0.0, s, 0.0], [0.0, 0.0, s]],
            offset: Vec3::ZERO,
        }
    }

    /// Right-handed rotation about +X by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_linear([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    /// Right-handed rotation about +Y by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_linear([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    /// Right-handed rotation about +Z by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_linear([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    fn from_linear(linear: [[f64; 3]; 3]) -> Self {
        Self {
            linear,
            offset: Vec3::ZERO,
        }
    }

    /// Model-to-sheet transform of a drawing view: `orientation` is applied
    /// first, then the view scale, then the placement of the view origin on the sheet.
    pub fn drawing_view(orientation: Transform, scale: f64, sheet_x: f64, sheet_y: f64) -> Self {
        Self::translation(sheet_x, sheet_y, 0.0)
            .then(&Self::uniform_scaling(scale))
            .then(&orientation)
    }

    fn apply_linear(&self, v: &Vec3) -> Vec3 {
        let [r0, r1, r2] = &self.linear;
        Vec3::new(
            r0[0] * v.x + r0[1] * v.y + r0[2] * v.z,
            r1[0] * v.x + r1[1] * v.y + r1[2] * v.z,
            r2[0] * v.x + r2[1] * v.y + r2[2] * v.z,
        )
    }

    pub fn transform_point(&self, p: &Point3d) -> Point3d {
        Point3d::ORIGIN + self.apply_linear(&(*p - Point3d::ORIGIN)) + self.offset
    }

    /// Directions ignore the translation.
    pub fn transform_vector(&self, v: &Vec3) -> Vec3 {
        self.apply_linear(v)
    }

    /// `self ∘ other`: the result applies `other` first.
    pub fn then(&self, other: &Transform) -> Transform {
        let mut linear = [[0.0; 3]; 3];
        for (r, row) in linear.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.linear[r][k] * other.linear[k][c]).sum();
            }
        }
        Transform {
            linear,
            offset: self.apply_linear(&other.offset) + self.offset,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Axis-aligned box; starts inverted so the first point sets both corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox {
    pub fn empty() -> Self {
        Self {
            min: Point3d::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3d::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Point3d]) -> Self {
        points.iter().fold(Self::empty(), |mut bb, p| {
            bb.include(p);
            bb
        })
    }

    pub fn include(&mut self, p: &Point3d) {
        self.min = Point3d::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Point3d::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Corner layout used by drawing hosts: `[x1, y1, z1, x2, y2, z2]`.
    pub fn to_corner_array(&self) -> [f64; 6] {
        let (a, b) = (self.min, self.max);
        [a.x, a.y, a.z, b.x, b.y, b.z]
    }
}

/// True when the box is thinner than the scribe thickness along any axis.
///
/// `corners` is `[x1, y1, z1, x2, y2, z2]`; the corners may come in any order.
pub fn box_indicates_thin_section(corners: &[f64; 6]) -> bool {
    let thinnest = (0..3)
        .map(|axis| (corners[axis] - corners[axis + 3]).abs())
        .fold(f64::INFINITY, f64::min);
    thinnest < crate::default_tolerance().thin_section
}
