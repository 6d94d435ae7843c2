pub mod geometry;
pub mod topology;

pub use geometry::point::{Point2d, Point3d};
pub use geometry::transform::{box_indicates_thin_section, BoundingBox, Transform};
pub use geometry::vector::{are_parallel, Vec3};

/// Global tolerance configuration for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Vectors at or below this magnitude are not normalized.
    pub degenerate_length: f64,
    /// Maximum deviation of `dot(unit(a), unit(b))` from 1 for parallel vectors.
    pub parallel: f64,
    /// Faces with a bounding-box extent below this in any axis are scribe marks (meters).
    pub thin_section: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            degenerate_length: 1e-10,
            parallel: 1e-10,
            thin_section: 1e-4,
        }
    }
}

impl Tolerance {
    pub fn is_degenerate_length(&self, length: f64) -> bool {
        length.abs() <= self.degenerate_length
    }
}

/// Process-wide default tolerance.
pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}
