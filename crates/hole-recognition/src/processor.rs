use std::collections::BTreeMap;
use std::fmt;

use scene_graph::{FaceHandle, SceneGraph, SelectionAccumulator, ViewHandle};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::classify::HoleType;
use crate::config::RecognitionConfig;
use crate::error::RecognitionError;
use crate::extract::extract_hole_candidates;
use crate::filter::filter_valid_holes;
use crate::progress::ProgressSink;
use crate::select::select_holes;

/// Outcome of one hole-recognition run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoleReport {
    pub candidates: usize,
    pub accepted: usize,
    pub selected: usize,
    /// Accepted holes per tooling type.
    pub by_type: BTreeMap<HoleType, usize>,
}

impl fmt::Display for HoleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} candidates, {} accepted, {} selected",
            self.candidates, self.accepted, self.selected
        )?;
        for (kind, count) in &self.by_type {
            writeln!(f, "{}: {}", kind, count)?;
        }
        Ok(())
    }
}

/// Extract, filter and select holes with one configuration.
#[derive(Debug, Clone, Default)]
pub struct HoleProcessor {
    config: RecognitionConfig,
}

impl HoleProcessor {
    pub fn new(config: RecognitionConfig) -> Result<Self, RecognitionError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RecognitionConfig {
        &self.config
    }

    #[instrument(skip_all, fields(faces = faces.len()))]
    pub fn process_faces<'g, S>(
        &self,
        scene: &'g S,
        faces: Vec<FaceHandle<'g>>,
        accumulator: &mut dyn SelectionAccumulator,
        progress: &mut dyn ProgressSink,
    ) -> Result<HoleReport, RecognitionError>
    where
        S: SceneGraph + ?Sized,
    {
        let candidates = extract_hole_candidates(scene, faces, progress)?;
        let candidate_count = candidates.len();

        let valid = filter_valid_holes(candidates, self.config.exclusion_radius);
        if valid.is_empty() && self.config.require_holes {
            return Err(RecognitionError::NoValidHoles {
                candidates: candidate_count,
            });
        }

        let mut by_type = BTreeMap::new();
        for hole in &valid {
            *by_type.entry(hole.hole_type).or_insert(0) += 1;
        }
        let accepted = valid.len();
        let selected = select_holes(valid, accumulator);

        info!(candidates = candidate_count, accepted, selected, "hole recognition complete");
        Ok(HoleReport {
            candidates: candidate_count,
            accepted,
            selected,
            by_type,
        })
    }

    /// Run over every face visible in a drawing view.
    pub fn process_view<'g, S>(
        &self,
        scene: &'g S,
        view: &ViewHandle<'g>,
        accumulator: &mut dyn SelectionAccumulator,
        progress: &mut dyn ProgressSink,
    ) -> Result<HoleReport, RecognitionError>
    where
        S: SceneGraph + ?Sized,
    {
        let faces = scene.visible_faces(view)?;
        self.process_faces(scene, faces, accumulator, progress)
    }
}
