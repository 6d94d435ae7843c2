use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;

/// Edge geometry carried by the B-rep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Curve {
    Line(Line3d),
    Circle(Circle3d),
    Ellipse(Ellipse3d),
}

/// Some unit vector perpendicular to `normal`.
pub(crate) fn perpendicular_to(normal: &Vec3) -> Vec3 {
    let helper = if normal.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    helper.cross(normal).unit()
}

/// `center + u·a·cos t + v·b·sin t` and its derivative in t.
fn conic_point(center: Point3d, u: Vec3, v: Vec3, a: f64, b: f64, t: f64) -> Point3d {
    let (s, c) = t.sin_cos();
    center + u * (a * c) + v * (b * s)
}

fn conic_tangent(u: Vec3, v: Vec3, a: f64, b: f64, t: f64) -> Vec3 {
    let (s, c) = t.sin_cos();
    u * (-a * s) + v * (b * c)
}

/// Unbounded line, parameterized by distance from `origin`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Line3d {
    pub origin: Point3d,
    pub direction: Vec3,
}

impl Line3d {
    /// Line through `a` heading for `b`; `t = 0` at `a`.
    pub fn from_points(a: Point3d, b: Point3d) -> Self {
        Self {
            origin: a,
            direction: (b - a).unit(),
        }
    }

    pub fn evaluate(&self, t: f64) -> Point3d {
        self.origin + self.direction * t
    }
}

/// Circle parameterized by angle, counter-clockwise about `normal`
/// starting from `x_axis`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Circle3d {
    pub center: Point3d,
    pub normal: Vec3,
    pub radius: f64,
    pub x_axis: Vec3,
}

impl Circle3d {
    pub fn new(center: Point3d, normal: Vec3, x_axis: Vec3, radius: f64) -> Self {
        Self {
            center,
            normal: normal.unit(),
            radius,
            x_axis: x_axis.unit(),
        }
    }

    pub fn evaluate(&self, t: f64) -> Point3d {
        let y_axis = self.normal.cross(&self.x_axis);
        conic_point(self.center, self.x_axis, y_axis, self.radius, self.radius, t)
    }

    pub fn derivative(&self, t: f64) -> Vec3 {
        let y_axis = self.normal.cross(&self.x_axis);
        conic_tangent(self.x_axis, y_axis, self.radius, self.radius, t)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ellipse3d {
    pub center: Point3d,
    pub normal: Vec3,
    pub major_axis: Vec3,
    pub major_radius: f64,
    pub minor_radius: f64,
}

impl Ellipse3d {
    pub fn new(center: Point3d, normal: Vec3, major_axis: Vec3, major_radius: f64, minor_radius: f64) -> Self {
        Self {
            center,
            normal: normal.unit(),
            major_axis: major_axis.unit(),
            major_radius,
            minor_radius,
        }
    }

    pub fn evaluate(&self, t: f64) -> Point3d {
        let minor = self.normal.cross(&self.major_axis);
        conic_point(self.center, self.major_axis, minor, self.major_radius, self.minor_radius, t)
    }

    pub fn derivative(&self, t: f64) -> Vec3 {
        let minor = self.normal.cross(&self.major_axis);
        conic_tangent(self.major_axis, minor, self.major_radius, self.minor_radius, t)
    }
}

impl Curve {
    pub fn evaluate(&self, t: f64) -> Point3d {
        match self {
            Curve::Line(l) => l.evaluate(t),
            Curve::Circle(c) => c.evaluate(t),
            Curve::Ellipse(e) => e.evaluate(t),
        }
    }

    /// First derivative in the curve's own parameterization.
    pub fn derivative(&self, t: f64) -> Vec3 {
        match self {
            Curve::Line(l) => l.direction,
            Curve::Circle(c) => c.derivative(t),
            Curve::Ellipse(e) => e.derivative(t),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Curve::Line(_) => "line",
            Curve::Circle(_) => "circle",
            Curve::Ellipse(_) => "ellipse",
        }
    }
}
