//! Structured text summaries of a drawing run.
//!
//! The text form is for reading in test output; the JSON form is for
//! diffing runs.

use dimensioning::{DimensionAxis, DimensionSummary, PlacedDimension, ToleranceStyle};
use hole_recognition::HoleReport;
use serde::Serialize;

use crate::helpers::HarnessError;
use crate::oracle::OracleVerdict;
use crate::workflow::{DimensionRun, HoleRun, SceneBuilder};

/// Everything a scenario learned about one drawing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DrawingReport {
    pub history: Vec<(String, String)>,
    pub holes: Option<HoleReport>,
    pub selected: Vec<String>,
    pub dimensions: Option<DimensionSummary>,
    pub placed: Vec<PlacedDimension>,
    pub verdicts: Vec<OracleVerdict>,
}

impl DrawingReport {
    pub fn new(builder: &SceneBuilder) -> Self {
        Self {
            history: builder.history().to_vec(),
            ..Self::default()
        }
    }

    pub fn with_holes(mut self, builder: &SceneBuilder, run: &HoleRun) -> Self {
        self.holes = Some(run.report.clone());
        self.selected = builder.names_of(&run.selected);
        self
    }

    pub fn with_dimensions(mut self, run: &DimensionRun) -> Self {
        self.dimensions = Some(run.summary);
        self.placed = run.placed.clone();
        self
    }

    pub fn with_verdict(mut self, verdict: OracleVerdict) -> Self {
        self.verdicts.push(verdict);
        self
    }

    pub fn all_passed(&self) -> bool {
        self.verdicts.iter().all(|v| v.passed)
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Drawing Report ===\n\n");

        out.push_str(&format!("Scene ({} steps):\n", self.history.len()));
        for (name, op) in &self.history {
            out.push_str(&format!("  {} ({})\n", name, op));
        }

        if let Some(holes) = &self.holes {
            out.push_str("\nHoles:\n");
            for line in holes.to_string().lines() {
                out.push_str(&format!("  {}\n", line));
            }
            out.push_str(&format!("  selected: {}\n", self.selected.join(", ")));
        }

        if let Some(summary) = &self.dimensions {
            out.push_str(&format!(
                "\nDimensions ({} over {} views, offset {:.4}):\n",
                summary.dimensions, summary.views, summary.offset
            ));
            for d in &self.placed {
                let axis = match d.axis {
                    DimensionAxis::Horizontal => "width",
                    DimensionAxis::Vertical => "height",
                };
                let tolerance = match d.tolerance {
                    ToleranceStyle::None => "",
                    ToleranceStyle::Symmetric => " +/-",
                };
                out.push_str(&format!("  {} at ({:.4}, {:.4}){}\n", axis, d.at.x, d.at.y, tolerance));
            }
        }

        if !self.verdicts.is_empty() {
            out.push_str("\nOracles:\n");
            for v in &self.verdicts {
                let mark = if v.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!("  [{}] {}: {}\n", mark, v.oracle_name, v.detail));
            }
        }
        out
    }

    pub fn to_json(&self) -> Result<String, HarnessError> {
        serde_json::to_string_pretty(self).map_err(|e| HarnessError::Serialization { reason: e.to_string() })
    }
}
