//! Test harness for hole recognition and drawing dimensioning.
//!
//! Provides programmatic tools for scripting drawing scenes, running the
//! recognition and dimensioning pipelines over them, and checking the results.
//!
//! # Key Components
//!
//! - [`SceneBuilder`]: Fluent API for plates, features and drawing views
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`report`]: Text and JSON run summaries
//! - [`helpers`]: Error type, tooling geometry, progress capture
//! - [`assertions`]: Assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;
pub mod workflow;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::DrawingReport;
pub use workflow::{DimensionRun, HoleRun, SceneBuilder};
