//! Sequential suite orchestration: build once, then run every case
//!
//! Everything is strictly sequential and single-threaded; each child
//! invocation is a blocking bounded wait. Parallelism, if any, lives
//! inside the simulator under test and is invisible here.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::harness::error::HarnessError;
use crate::harness::fixtures;
use crate::harness::report::{RunSummary, SuiteReporter};
use crate::harness::runner::{self, CaseStatus};
use crate::harness::variant::Variant;

/// Settings for one harness run.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Directory scanned for fixtures; also where actual output lands
    pub fixture_dir: PathBuf,
    /// Per-case execution bound
    pub timeout: Duration,
}

/// Build the variant, then run every discovered case in discovery order.
///
/// Only build and discovery failures abort. Per-case conditions are
/// isolated: they are reported, counted in the summary, and the run
/// continues with the next case.
pub fn run_suite(
    variant: &Variant,
    config: &SuiteConfig,
    reporter: &mut dyn SuiteReporter,
) -> Result<RunSummary, HarnessError> {
    let start = Instant::now();

    reporter.on_build_start(&variant.command_line());
    variant.build()?;
    tracing::debug!("built variant '{}' at {}", variant.selector, variant.executable.display());

    let cases = fixtures::discover_cases(&config.fixture_dir)?;
    reporter.on_collection_complete(cases.len());

    let mut summary = RunSummary::default();
    for case in &cases {
        let invocation = format!(
            "{} {} {}",
            variant.executable.display(),
            case.input_path().display(),
            case.parameter
        );
        reporter.on_case_start(&invocation);

        let result = runner::run_case(&variant.executable, case, config.timeout);
        match &result.status {
            CaseStatus::Passed => summary.passed += 1,
            CaseStatus::Failed { .. } => summary.failed += 1,
            _ => summary.errored += 1,
        }
        reporter.on_case_complete(case, &result);
    }

    summary.duration = start.elapsed();
    reporter.on_run_complete(&summary);
    Ok(summary)
}
