use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use super::vector::Vec3;

/// Model-space position in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        *self + (*other - *self) * 0.5
    }
}

impl Add<Vec3> for Point3d {
    type Output = Point3d;
    fn add(self, v: Vec3) -> Point3d {
        Point3d::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Sub for Point3d {
    type Output = Vec3;
    fn sub(self, other: Point3d) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// Position on a drawing sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_distance() {
        let a = Point3d::new(1.0, 2.0, 2.0);
        assert_abs_diff_eq!(a.distance_to(&Point3d::ORIGIN), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_midpoint() {
        let m = Point3d::ORIGIN.midpoint(&Point3d::new(2.0, 4.0, 6.0));
        assert_eq!(m, Point3d::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_difference_is_a_vector() {
        let v = Point3d::new(3.0, 4.0, 5.0) - Point3d::new(1.0, 1.0, 1.0);
        assert_eq!(v, Vec3::new(2.0, 3.0, 4.0));
    }
}
