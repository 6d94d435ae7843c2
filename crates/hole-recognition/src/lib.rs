//! Finds formed and cut holes on the visible faces of a drawing view,
//! identifies their tooling by wall area, and selects their edges.

pub mod candidate;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod hole_table;
pub mod processor;
pub mod progress;
pub mod select;

pub use candidate::{CircleDescriptor, HoleCandidate};
pub use classify::{classify, HoleType, AREA_TOLERANCE, KNOWN_AREAS};
pub use config::RecognitionConfig;
pub use error::RecognitionError;
pub use extract::extract_hole_candidates;
pub use filter::{check_candidate, filter_valid_holes, Rejection};
pub use hole_table::{annotate_forming_tools, MemoryTable, TableEditor, FORMING_TOOLS};
pub use processor::{HoleProcessor, HoleReport};
pub use progress::{NoProgress, ProgressSink};
pub use select::select_holes;
