//! Run-aborting harness conditions
//!
//! Per-case conditions (abnormal exit, timeout, missing comparison input)
//! are deliberately *not* represented here: they live on each case's
//! [`CaseStatus`](crate::harness::runner::CaseStatus) so that one bad case
//! never aborts the rest of the run.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// Selector is in the registry but its build command is intentionally
    /// absent. Rejected at lookup time, before any build is attempted.
    #[error("variant '{0}' is not implemented yet (no build command defined)")]
    NotImplemented(String),

    /// Build tool exited non-zero. Nothing runs after this.
    #[error("build failed ({status}):\n{stderr}")]
    BuildFailed { status: String, stderr: String },

    #[error("cannot read fixture directory '{0}': {1}")]
    FixtureDir(PathBuf, #[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
