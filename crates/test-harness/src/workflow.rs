//! SceneBuilder: a fluent API for scripting drawing scenes in tests.
//!
//! Builds a plate with named features on an in-memory scene, adds drawing
//! views, and runs hole recognition and dimensioning over the result.

use std::collections::HashMap;

use dimensioning::{dimension_views, DimensionConfig, DimensionSummary, PlacedDimension, RecordingSink};
use hole_recognition::{HoleProcessor, HoleReport, HoleType, RecognitionConfig};
use scene_graph::{BrepScene, DrawingView, SceneGraph};
use sheet_kernel::topology::brep::{EdgeId, EntityStore};
use sheet_kernel::topology::primitives::{add_boss, cut_pocket, make_plate, punch_hole, Plate};
use sheet_kernel::Point3d;
use tracing::info;

use crate::helpers::*;

/// Gap between views laid out by [`SceneBuilder::standard_views`] (sheet units).
const VIEW_GAP: f64 = 0.05;

/// Outcome of a hole-recognition run.
#[derive(Debug, Clone)]
pub struct HoleRun {
    pub report: HoleReport,
    /// Selected edges, in selection order.
    pub selected: Vec<EdgeId>,
    pub progress: Vec<(usize, usize)>,
}

/// Outcome of a dimensioning run.
#[derive(Debug, Clone)]
pub struct DimensionRun {
    pub summary: DimensionSummary,
    pub placed: Vec<PlacedDimension>,
}

/// A fluent builder for drawing scenes in tests.
///
/// Every feature is named; its rim edge (the edge on the plate's top face)
/// is what recognition selects, so selections can be read back by name.
pub struct SceneBuilder {
    scene: BrepScene,
    plate: Plate,
    named_features: HashMap<String, EdgeId>,
    history: Vec<(String, String)>,
}

impl SceneBuilder {
    /// Start from a plate with its lower-left-bottom corner at the origin.
    pub fn plate(width: f64, height: f64, thickness: f64) -> Result<Self, HarnessError> {
        let mut store = EntityStore::new();
        let plate = make_plate(&mut store, Point3d::ORIGIN, width, height, thickness)?;
        Ok(Self {
            scene: BrepScene::new(store),
            plate,
            named_features: HashMap::new(),
            history: vec![("plate".to_string(), format!("{} x {} x {}", width, height, thickness))],
        })
    }

    /// A plate whose thickness makes every through hole of `radius` read as `kind`.
    pub fn plate_for(kind: HoleType, radius: f64, width: f64, height: f64) -> Result<Self, HarnessError> {
        Self::plate(width, height, thickness_for_hole_type(kind, radius)?)
    }

    // ── Features ────────────────────────────────────────────────────────

    pub fn hole(&mut self, name: &str, x: f64, y: f64, radius: f64) -> Result<EdgeId, HarnessError> {
        self.check_name_available(name)?;
        let plate = self.plate;
        let hole = punch_hole(self.scene.store_mut(), &plate, x, y, radius)?;
        Ok(self.record(name, "hole", hole.top_edge))
    }

    pub fn boss(&mut self, name: &str, x: f64, y: f64, radius: f64, height: f64) -> Result<EdgeId, HarnessError> {
        self.check_name_available(name)?;
        let plate = self.plate;
        let boss = add_boss(self.scene.store_mut(), &plate, x, y, radius, height)?;
        Ok(self.record(name, "boss", boss.base_edge))
    }

    pub fn pocket(&mut self, name: &str, x: f64, y: f64, radius: f64, depth: f64) -> Result<EdgeId, HarnessError> {
        self.check_name_available(name)?;
        let plate = self.plate;
        let pocket = cut_pocket(self.scene.store_mut(), &plate, x, y, radius, depth)?;
        Ok(self.record(name, "pocket", pocket.rim_edge))
    }

    /// A circular scribe mark: a pocket too shallow to be a feature.
    pub fn scribe(&mut self, name: &str, x: f64, y: f64, radius: f64) -> Result<EdgeId, HarnessError> {
        self.check_name_available(name)?;
        let plate = self.plate;
        let scribe = cut_pocket(self.scene.store_mut(), &plate, x, y, radius, SCRIBE_DEPTH)?;
        Ok(self.record(name, "scribe", scribe.rim_edge))
    }

    // ── Views ───────────────────────────────────────────────────────────

    pub fn view(&mut self, view: DrawingView) -> &mut Self {
        self.history.push((view.name.clone(), "view".to_string()));
        self.scene.add_view(view);
        self
    }

    /// Top view at the sheet origin, front view below it, right view beside that.
    pub fn standard_views(&mut self) -> &mut Self {
        let front_y = -(self.plate.thickness + VIEW_GAP);
        let right_x = self.plate.width + VIEW_GAP;
        self.view(DrawingView::top(1.0, 0.0, 0.0))
            .view(DrawingView::front(1.0, 0.0, front_y))
            .view(DrawingView::right(1.0, right_x, front_y))
    }

    // ── Runs ────────────────────────────────────────────────────────────

    /// Recognize holes in the first view and select them.
    pub fn recognize_holes(&self, config: RecognitionConfig) -> Result<HoleRun, HarnessError> {
        let processor = HoleProcessor::new(config)?;
        let views = self.scene.drawing_views();
        let view = views.first().ok_or(HarnessError::NoViews)?;

        let mut selection = self.scene.selection();
        let mut progress = ProgressLog::default();
        let report = processor.process_view(&self.scene, view, &mut selection, &mut progress)?;
        info!(selected = selection.len(), "harness hole run");

        Ok(HoleRun {
            report,
            selected: selection.edges().to_vec(),
            progress: progress.updates,
        })
    }

    /// Dimension every view.
    pub fn dimension(&self, config: &DimensionConfig) -> Result<DimensionRun, HarnessError> {
        let views = self.scene.drawing_views();
        let mut sink = RecordingSink::default();
        let summary = dimension_views(&self.scene, &views, &mut sink, config)?;
        Ok(DimensionRun {
            summary,
            placed: sink.placed,
        })
    }

    // ── Lookup ──────────────────────────────────────────────────────────

    pub fn edge(&self, name: &str) -> Result<EdgeId, HarnessError> {
        self.named_features
            .get(name)
            .copied()
            .ok_or_else(|| HarnessError::FeatureNotFound { name: name.to_string() })
    }

    /// Feature names of `edges`, in order. Edges that are not a feature rim
    /// come back as `"?"`.
    pub fn names_of(&self, edges: &[EdgeId]) -> Vec<String> {
        edges
            .iter()
            .map(|edge| {
                self.named_features
                    .iter()
                    .find(|(_, id)| *id == edge)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_else(|| "?".to_string())
            })
            .collect()
    }

    pub fn scene(&self) -> &BrepScene {
        &self.scene
    }

    pub fn plate_info(&self) -> &Plate {
        &self.plate
    }

    /// `(name, operation)` pairs in the order they were added.
    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }

    fn check_name_available(&self, name: &str) -> Result<(), HarnessError> {
        if self.named_features.contains_key(name) {
            return Err(HarnessError::DuplicateName { name: name.to_string() });
        }
        Ok(())
    }

    fn record(&mut self, name: &str, operation: &str, edge: EdgeId) -> EdgeId {
        self.named_features.insert(name.to_string(), edge);
        self.history.push((name.to_string(), operation.to_string()));
        edge
    }
}
