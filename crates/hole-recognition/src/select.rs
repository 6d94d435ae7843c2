use scene_graph::SelectionAccumulator;
use tracing::{info, instrument, warn};

use crate::candidate::HoleCandidate;

/// Add every hole's edge to the selection, releasing each edge right after.
/// Returns how many edges were selected; an edge the accumulator refuses is
/// skipped.
#[instrument(skip(holes, accumulator), fields(holes = holes.len()))]
pub fn select_holes(holes: Vec<HoleCandidate<'_>>, accumulator: &mut dyn SelectionAccumulator) -> usize {
    let mut selected = 0;
    for hole in holes {
        match accumulator.add_edge(&hole.edge) {
            Ok(()) => selected += 1,
            Err(err) => warn!(loop_index = hole.loop_index, %err, "could not select hole edge"),
        }
    }
    info!(selected, "selected hole edges");
    selected
}
