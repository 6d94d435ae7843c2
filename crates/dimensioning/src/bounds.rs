//! Extent of a view's outline and the edges that define it.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::edge_extract::BoundaryEdge;
use crate::error::DimensionError;

/// Sheet-space extent of one view: x over vertical edges, y over horizontal ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsRecord {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BoundsRecord {
    pub fn from_edges(edges: &[BoundaryEdge<'_>]) -> Result<Self, DimensionError> {
        let (vertical, horizontal): (Vec<&BoundaryEdge<'_>>, Vec<&BoundaryEdge<'_>>) =
            edges.iter().partition(|e| e.is_vertical());
        if vertical.is_empty() {
            return Err(DimensionError::NoVerticalEdges { edges: edges.len() });
        }
        if horizontal.is_empty() {
            return Err(DimensionError::NoHorizontalEdges { edges: edges.len() });
        }

        let xs = vertical.iter().map(|e| e.x);
        let ys = horizontal.iter().map(|e| e.y);
        Ok(Self {
            x_min: xs.clone().fold(f64::INFINITY, f64::min),
            x_max: xs.fold(f64::NEG_INFINITY, f64::max),
            y_min: ys.clone().fold(f64::INFINITY, f64::min),
            y_max: ys.fold(f64::NEG_INFINITY, f64::max),
        })
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// The four edges that bound a view.
#[derive(Debug, Clone, Copy)]
pub struct BoundEdges<'a, 'g> {
    pub x_min: &'a BoundaryEdge<'g>,
    pub x_max: &'a BoundaryEdge<'g>,
    pub y_min: &'a BoundaryEdge<'g>,
    pub y_max: &'a BoundaryEdge<'g>,
}

/// Extremal edge by `key`; the first edge wins a tie.
fn extremal<'a, 'g>(
    edges: impl Iterator<Item = &'a BoundaryEdge<'g>>,
    key: impl Fn(&BoundaryEdge<'g>) -> f64,
    better: impl Fn(f64, f64) -> bool,
) -> Option<&'a BoundaryEdge<'g>>
where
    'g: 'a,
{
    edges.fold(None, |best, edge| match best {
        Some(current) if !better(key(edge), key(current)) => Some(current),
        _ => Some(edge),
    })
}

/// A view's straight edges together with their bounds.
///
/// Holds the edges for as long as the view is being dimensioned; dropping it
/// releases them all.
#[derive(Debug)]
pub struct BoundarySolver<'g> {
    edges: Vec<BoundaryEdge<'g>>,
    bounds: BoundsRecord,
}

impl<'g> BoundarySolver<'g> {
    #[instrument(skip_all, fields(edges = edges.len()))]
    pub fn new(edges: Vec<BoundaryEdge<'g>>) -> Result<Self, DimensionError> {
        let bounds = BoundsRecord::from_edges(&edges)?;
        debug!(
            x_min = bounds.x_min,
            x_max = bounds.x_max,
            y_min = bounds.y_min,
            y_max = bounds.y_max,
            "view bounds"
        );
        Ok(Self { edges, bounds })
    }

    pub fn bounds(&self) -> &BoundsRecord {
        &self.bounds
    }

    pub fn edges(&self) -> &[BoundaryEdge<'g>] {
        &self.edges
    }

    /// Leftmost and rightmost vertical edges, bottommost and topmost
    /// horizontal ones.
    pub fn find_bound_edges(&self) -> Result<BoundEdges<'_, 'g>, DimensionError> {
        let count = self.edges.len();
        let vertical = || self.edges.iter().filter(|e| e.is_vertical());
        let horizontal = || self.edges.iter().filter(|e| !e.is_vertical());

        let no_vertical = || DimensionError::NoVerticalEdges { edges: count };
        let no_horizontal = || DimensionError::NoHorizontalEdges { edges: count };

        Ok(BoundEdges {
            x_min: extremal(vertical(), |e| e.x, |a, b| a < b).ok_or_else(no_vertical)?,
            x_max: extremal(vertical(), |e| e.x, |a, b| a > b).ok_or_else(no_vertical)?,
            y_min: extremal(horizontal(), |e| e.y, |a, b| a < b).ok_or_else(no_horizontal)?,
            y_max: extremal(horizontal(), |e| e.y, |a, b| a > b).ok_or_else(no_horizontal)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_graph::{Handle, HandleId, Release};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Releases(RefCell<Vec<HandleId>>);

    impl Release for Releases {
        fn release(&self, id: HandleId) {
            self.0.borrow_mut().push(id);
        }
    }

    fn edge(owner: &Releases, id: u64, x: f64, y: f64, dx: f64, dy: f64) -> BoundaryEdge<'_> {
        BoundaryEdge {
            x,
            y,
            dx,
            dy,
            dz: 0.0,
            edge: Handle::new(HandleId(id), owner),
        }
    }

    /// A 5 x 3 rectangle traversed counter-clockwise.
    fn rectangle(owner: &Releases) -> Vec<BoundaryEdge<'_>> {
        vec![
            edge(owner, 1, 0.0, 0.0, 1.0, 0.0),
            edge(owner, 2, 5.0, 0.0, 0.0, 1.0),
            edge(owner, 3, 5.0, 3.0, -1.0, 0.0),
            edge(owner, 4, 0.0, 3.0, 0.0, -1.0),
        ]
    }

    #[test]
    fn test_rectangle_bounds() {
        let owner = Releases::default();
        let bounds = BoundsRecord::from_edges(&rectangle(&owner)).unwrap();
        assert_eq!(
            bounds,
            BoundsRecord {
                x_min: 0.0,
                x_max: 5.0,
                y_min: 0.0,
                y_max: 3.0
            }
        );
        assert_eq!(bounds.width(), 5.0);
        assert_eq!(bounds.height(), 3.0);
    }

    #[test]
    fn test_bounds_ignore_other_orientation() {
        let owner = Releases::default();
        let mut edges = rectangle(&owner);
        // A horizontal edge far to the right does not widen the x range.
        edges.push(edge(&owner, 5, 9.0, 1.0, 1.0, 0.0));
        let bounds = BoundsRecord::from_edges(&edges).unwrap();
        assert_eq!(bounds.x_max, 5.0);
        assert_eq!(bounds.y_max, 3.0);
    }

    #[test]
    fn test_diagonal_counts_as_horizontal() {
        let owner = Releases::default();
        let e = edge(&owner, 1, 0.0, 0.0, 0.70710678, 0.70710678);
        assert!(!e.is_vertical());
    }

    #[test]
    fn test_bound_edges() {
        let owner = Releases::default();
        let solver = BoundarySolver::new(rectangle(&owner)).unwrap();
        let bound = solver.find_bound_edges().unwrap();
        assert_eq!(bound.x_min.edge_id(), HandleId(4));
        assert_eq!(bound.x_max.edge_id(), HandleId(2));
        assert_eq!(bound.y_min.edge_id(), HandleId(1));
        assert_eq!(bound.y_max.edge_id(), HandleId(3));
    }

    #[test]
    fn test_ties_go_to_first_edge() {
        let owner = Releases::default();
        let mut edges = rectangle(&owner);
        edges.push(edge(&owner, 5, 0.0, 1.0, 0.0, 1.0));
        edges.push(edge(&owner, 6, 2.0, 3.0, 1.0, 0.0));
        let solver = BoundarySolver::new(edges).unwrap();
        let bound = solver.find_bound_edges().unwrap();
        assert_eq!(bound.x_min.edge_id(), HandleId(4));
        assert_eq!(bound.y_max.edge_id(), HandleId(3));
    }

    #[test]
    fn test_missing_orientation_is_an_error() {
        let owner = Releases::default();
        let edges = vec![edge(&owner, 1, 0.0, 0.0, 1.0, 0.0), edge(&owner, 2, 0.0, 3.0, -1.0, 0.0)];
        assert!(matches!(
            BoundarySolver::new(edges),
            Err(DimensionError::NoVerticalEdges { edges: 2 })
        ));
        // Both edges were released when the failed solver input was dropped.
        assert_eq!(owner.0.borrow().len(), 2);
    }

    #[test]
    fn test_dropping_solver_releases_edges() {
        let owner = Releases::default();
        let solver = BoundarySolver::new(rectangle(&owner)).unwrap();
        assert!(owner.0.borrow().is_empty());
        drop(solver);
        assert_eq!(owner.0.borrow().len(), 4);
    }
}
