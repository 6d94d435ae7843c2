use serde::{Deserialize, Serialize};

use super::curves::perpendicular_to;
use super::point::Point3d;
use super::vector::Vec3;

/// Face geometry carried by the B-rep. Sheet-metal parts only need planes
/// and the cylindrical walls of holes and bosses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Surface {
    Plane(Plane),
    Cylinder(Cylinder),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3d,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(origin: Point3d, normal: Vec3) -> Self {
        Self {
            origin,
            normal: normal.unit(),
        }
    }
}

/// Unbounded circular cylinder. Its natural normal points away from the axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cylinder {
    pub origin: Point3d,
    pub axis: Vec3,
    pub radius: f64,
}

impl Cylinder {
    pub fn new(origin: Point3d, axis: Vec3, radius: f64) -> Self {
        Self {
            origin,
            axis: axis.unit(),
            radius,
        }
    }

    /// Radial direction through `p`; points on the axis get an arbitrary
    /// perpendicular.
    pub fn normal_at_point(&self, p: &Point3d) -> Vec3 {
        let from_origin = *p - self.origin;
        let radial = from_origin - self.axis * from_origin.dot(&self.axis);
        radial.normalized().unwrap_or_else(|| perpendicular_to(&self.axis))
    }
}

impl Surface {
    /// Natural (unsensed) normal of the surface at a point on it.
    pub fn normal_at_point(&self, p: &Point3d) -> Vec3 {
        match self {
            Surface::Plane(plane) => plane.normal,
            Surface::Cylinder(c) => c.normal_at_point(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_plane_normal_is_unit() {
        let p = Surface::Plane(Plane::new(Point3d::ORIGIN, Vec3::new(0.0, 0.0, 2.0)));
        assert_eq!(p.normal_at_point(&Point3d::new(5.0, 5.0, 0.0)), Vec3::Z);
    }

    #[test]
    fn test_cylinder_normal_points_away_from_axis() {
        let c = Cylinder::new(Point3d::new(1.0, 1.0, 0.0), Vec3::Z, 0.5);
        let n = Surface::Cylinder(c).normal_at_point(&Point3d::new(1.5, 1.0, 0.3));
        assert_abs_diff_eq!(n.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(n.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(n.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cylinder_normal_on_axis_is_perpendicular() {
        let c = Cylinder::new(Point3d::ORIGIN, Vec3::Z, 0.5);
        let n = c.normal_at_point(&Point3d::new(0.0, 0.0, 1.0));
        assert_abs_diff_eq!(n.dot(&Vec3::Z), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(n.length(), 1.0, epsilon = 1e-12);
    }
}
