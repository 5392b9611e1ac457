//! Test-orchestration core
//!
//! One module per stage of the pipeline, in execution order:
//!
//! - `variant` - the closed registry of simulator build configurations and
//!   the build invocation itself
//! - `fixtures` - discovery of test cases from the fixture directory
//! - `runner` - per-case child-process execution with timing and a bounded
//!   timeout
//! - `compare` - byte comparison of actual vs. golden output via `diff`
//! - `report` - console rendering of per-case and aggregate results
//! - `suite` - the sequential orchestration tying the stages together

pub mod compare;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod suite;
pub mod variant;
