//! Rich assertion helpers with diagnostic output.
//!
//! Every failure names the context, the expected value and what was found.

use hole_recognition::{HoleReport, HoleType};
use scene_graph::BrepScene;

use crate::helpers::HarnessError;
use crate::oracle::{check_handle_balance, OracleVerdict};
use crate::workflow::{HoleRun, SceneBuilder};

/// Assert the scene holds no live handles and saw no double release.
pub fn assert_no_leaks(scene: &BrepScene, ctx: &str) -> Result<(), HarnessError> {
    assert_verdict(&check_handle_balance(&scene.ledger_stats()), ctx)
}

/// Turn a failed verdict into an error.
pub fn assert_verdict(verdict: &OracleVerdict, ctx: &str) -> Result<(), HarnessError> {
    if verdict.passed {
        Ok(())
    } else {
        Err(HarnessError::OracleFailure {
            oracle: verdict.oracle_name.clone(),
            detail: format!("[{}] {}", ctx, verdict.detail),
        })
    }
}

/// Assert the run selected exactly the named features, in order.
pub fn assert_selected(builder: &SceneBuilder, run: &HoleRun, expected: &[&str], ctx: &str) -> Result<(), HarnessError> {
    let actual = builder.names_of(&run.selected);
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected selection {:?}, got {:?}", ctx, expected, actual),
        })
    }
}

/// Assert how many accepted holes were identified as `kind`.
pub fn assert_hole_count(report: &HoleReport, kind: HoleType, expected: usize, ctx: &str) -> Result<(), HarnessError> {
    let actual = report.by_type.get(&kind).copied().unwrap_or(0);
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected {} x {}, got {}\n{}", ctx, expected, kind, actual, report),
        })
    }
}

/// Assert a value is within `tol` of the expected one.
pub fn assert_near(actual: f64, expected: f64, tol: f64, ctx: &str) -> Result<(), HarnessError> {
    if (actual - expected).abs() <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected {:.9}, got {:.9} (tol={})", ctx, expected, actual, tol),
        })
    }
}
