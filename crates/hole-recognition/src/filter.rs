use std::fmt;

use sheet_kernel::{are_parallel, box_indicates_thin_section};
use tracing::{debug, info, instrument};

use crate::candidate::HoleCandidate;

/// Why a candidate is not a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Radius at or above the exclusion radius.
    TooLarge,
    /// Both faces share a normal, so the circle is a transition between surfaces.
    CoplanarTransition,
    /// The wall turns the wrong way for a cut, as on a boss.
    NotACut,
    /// The wall is thinner than a scribe mark.
    Scribe,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rejection::TooLarge => "radius at or above exclusion radius",
            Rejection::CoplanarTransition => "adjacent faces share a normal",
            Rejection::NotACut => "wall orientation is not a cut",
            Rejection::Scribe => "adjacent face is a scribe",
        };
        f.write_str(text)
    }
}

/// Run the four hole checks in order, returning the first one that fails.
pub fn check_candidate(candidate: &HoleCandidate<'_>, exclusion_radius: f64) -> Option<Rejection> {
    if candidate.circle.radius >= exclusion_radius {
        return Some(Rejection::TooLarge);
    }
    if are_parallel(&candidate.this_face_normal, &candidate.partner_face_normal) {
        return Some(Rejection::CoplanarTransition);
    }
    let cross = candidate.this_face_normal.cross(&candidate.partner_face_normal);
    if !are_parallel(&cross, &candidate.edge_tangent) {
        return Some(Rejection::NotACut);
    }
    if box_indicates_thin_section(&candidate.partner_box) {
        return Some(Rejection::Scribe);
    }
    None
}

/// Keep the candidates that pass every check, in input order. Rejected
/// candidates are dropped here, which releases their edges.
#[instrument(skip(candidates), fields(candidates = candidates.len()))]
pub fn filter_valid_holes(candidates: Vec<HoleCandidate<'_>>, exclusion_radius: f64) -> Vec<HoleCandidate<'_>> {
    let mut valid = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match check_candidate(&candidate, exclusion_radius) {
            None => valid.push(candidate),
            Some(reason) => {
                debug!(loop_index = candidate.loop_index, %reason, "rejected hole candidate");
            }
        }
    }
    info!(accepted = valid.len(), "filtered hole candidates");
    valid
}
