#![forbid(unsafe_code)]
//! Golden-output test harness for the `life3d` simulator
//!
//! The simulator exists in several build variants (serial, OpenMP, MPI)
//! that must all produce byte-identical output. This crate builds one
//! selected variant, discovers test fixtures from a `name.in` /
//! `name.steps.out` naming convention, runs each case with output capture
//! and wall-clock timing, byte-compares the captured output against the
//! golden file, and reports per-case and aggregate results.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a harness bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

pub mod cli;
pub mod harness;

pub use harness::compare::{self, Comparison};
pub use harness::error::HarnessError;
pub use harness::fixtures::{TestCase, discover_cases};
pub use harness::report::{ConsoleReporter, RunSummary, SuiteReporter};
pub use harness::runner::{CaseStatus, ExecutionResult, run_case};
pub use harness::suite::{SuiteConfig, run_suite};
pub use harness::variant::{Selector, Variant};
