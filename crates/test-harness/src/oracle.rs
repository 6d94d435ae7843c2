//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a scenario collect all failures in one pass.

use dimensioning::{DimensionAxis, PlacedDimension};
use scene_graph::LedgerStats;
use serde::Serialize;
use sheet_kernel::topology::brep::{audit_solid, EntityStore, SolidId};

/// Slack for comparing sheet positions that went through 8-decimal rounding.
const SHEET_EPSILON: f64 = 1e-8;

/// The result of a single oracle check.
#[derive(Debug, Clone, Serialize)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

// ── Handle Oracles ──────────────────────────────────────────────────────────

/// Every acquired handle was released, and none twice.
pub fn check_handle_balance(stats: &LedgerStats) -> OracleVerdict {
    let detail = format!(
        "acquired {}, released {}, double released {}",
        stats.acquired, stats.released, stats.double_released
    );
    if stats.live() == 0 && stats.double_released == 0 {
        OracleVerdict::pass("handle_balance", detail)
    } else {
        OracleVerdict::fail("handle_balance", detail).with_value(stats.live() as f64)
    }
}

// ── Topology Oracles ────────────────────────────────────────────────────────

/// Loops are closed and every half-edge has an opposed twin.
pub fn check_topology(store: &EntityStore, solid: SolidId) -> OracleVerdict {
    let audit = audit_solid(store, solid);
    if audit.all_valid() {
        OracleVerdict::pass("topology", format!("{} faces audited", store.faces.len()))
    } else {
        OracleVerdict::fail("topology", format!("{} problems: {:?}", audit.errors.len(), audit.errors))
            .with_value(audit.errors.len() as f64)
    }
}

// ── Dimension Oracles ───────────────────────────────────────────────────────

/// Every dimension sits at least `offset` outside the edges it measures:
/// width dimensions above them, height dimensions to their left.
pub fn check_dimensions_clear_outline(placed: &[PlacedDimension], offset: f64) -> OracleVerdict {
    for (i, d) in placed.iter().enumerate() {
        let (clearance, direction) = match d.axis {
            DimensionAxis::Horizontal => (d.at.y - d.first.y.max(d.second.y), "above"),
            DimensionAxis::Vertical => (d.first.x.min(d.second.x) - d.at.x, "left of"),
        };
        if clearance + SHEET_EPSILON < offset {
            return OracleVerdict::fail(
                "dimensions_clear_outline",
                format!(
                    "dimension {} is {:.6} {} its edges, needs {:.6}",
                    i, clearance, direction, offset
                ),
            )
            .with_value(clearance);
        }
    }
    OracleVerdict::pass("dimensions_clear_outline", format!("{} dimensions clear by {:.6}", placed.len(), offset))
        .with_value(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_graph::HandleId;
    use sheet_kernel::topology::primitives::make_plate;
    use sheet_kernel::{Point2d, Point3d};

    fn width_dimension(at_y: f64) -> PlacedDimension {
        PlacedDimension {
            axis: DimensionAxis::Horizontal,
            first: Point2d::new(0.0, 0.0),
            second: Point2d::new(5.0, 0.0),
            first_edge: HandleId(1),
            second_edge: HandleId(2),
            at: Point2d::new(2.5, at_y),
            tolerance: Default::default(),
        }
    }

    #[test]
    fn test_balanced_ledger() {
        let stats = LedgerStats {
            acquired: 4,
            released: 4,
            double_released: 0,
        };
        assert!(check_handle_balance(&stats).passed);
    }

    #[test]
    fn test_leak_is_reported() {
        let stats = LedgerStats {
            acquired: 4,
            released: 3,
            double_released: 0,
        };
        let verdict = check_handle_balance(&stats);
        assert!(!verdict.passed);
        assert_eq!(verdict.value, Some(1.0));
    }

    #[test]
    fn test_plate_topology() {
        let mut store = EntityStore::new();
        let plate = make_plate(&mut store, Point3d::ORIGIN, 1.0, 1.0, 0.1).unwrap();
        assert!(check_topology(&store, plate.solid).passed);
    }

    #[test]
    fn test_dimension_clearance() {
        assert!(check_dimensions_clear_outline(&[width_dimension(3.6)], 0.6).passed);
        assert!(!check_dimensions_clear_outline(&[width_dimension(0.5)], 0.6).passed);
    }
}
