//! Tooling identification from the area of a hole's wall.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Forming tools a round cut-out can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HoleType {
    Et1032,
    Et832,
    Et632,
    Et2520,
    Grommet875,
    BridgePunch060,
    Unknown,
}

impl HoleType {
    /// Callout used on drawings.
    pub fn description(&self) -> &'static str {
        match self {
            HoleType::Et1032 => "10-32 E&T",
            HoleType::Et832 => "8-32 E&T",
            HoleType::Et632 => "6-32 E&T",
            HoleType::Et2520 => "1/4-20 E&T",
            HoleType::Grommet875 => "0.875 Grommet",
            HoleType::BridgePunch060 => "Bridge Punch",
            HoleType::Unknown => "Unknown, or Through-Hole",
        }
    }
}

impl fmt::Display for HoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Maximum difference between a measured and a known wall area (m²).
pub const AREA_TOLERANCE: f64 = 0.00000005;

/// Known inner wall areas of the standard tools, in lookup order (m²).
/// 1/4-20 has no entry and is never identified by area.
pub const KNOWN_AREAS: [(HoleType, f64); 5] = [
    (HoleType::Et1032, 0.00000809),
    (HoleType::Et832, 0.00000323),
    (HoleType::Et632, 0.00000297),
    (HoleType::Grommet875, 0.00013301),
    (HoleType::BridgePunch060, 0.00000584),
];

/// First tool in table order whose known area is within tolerance, else `Unknown`.
pub fn classify(area: f64) -> HoleType {
    KNOWN_AREAS
        .iter()
        .find(|(_, known)| (area - known).abs() <= AREA_TOLERANCE)
        .map(|(kind, _)| *kind)
        .unwrap_or(HoleType::Unknown)
}
