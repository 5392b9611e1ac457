//! Case runner: executes one fixture against a built variant
//!
//! The simulator contract is `executable <input> <generations>` writing
//! its result board to stdout with exit status 0. The runner redirects
//! stdout into the case's actual-output file, times the run on a
//! monotonic clock, and enforces a bounded wait so an unresponsive
//! simulator cannot hang the whole suite.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::harness::compare;
use crate::harness::fixtures::TestCase;

/// Outcome classification for a single case.
#[derive(Debug)]
pub enum CaseStatus {
    Passed,
    /// Comparator produced output: actual differs from golden.
    Failed { diff: String },
    /// Child exited non-zero; the comparator is not consulted since the
    /// actual output may be truncated or absent.
    ExecFailed { code: Option<i32>, stderr: String },
    /// Child exceeded the bound and was killed.
    TimedOut { limit: Duration },
    /// Input fixture absent; nothing was executed.
    MissingInput { path: PathBuf },
    /// Comparison could not be carried out.
    CompareError { message: String },
}

impl CaseStatus {
    pub fn passed(&self) -> bool {
        matches!(self, CaseStatus::Passed)
    }

    /// Errored as opposed to failed: the case could not be meaningfully
    /// compared against its golden output.
    pub fn errored(&self) -> bool {
        matches!(
            self,
            CaseStatus::ExecFailed { .. }
                | CaseStatus::TimedOut { .. }
                | CaseStatus::MissingInput { .. }
                | CaseStatus::CompareError { .. }
        )
    }
}

/// Outcome of running one case against one variant. Consumed immediately
/// by the reporter; only the actual-output file persists on disk.
#[derive(Debug)]
pub struct ExecutionResult {
    pub elapsed: Duration,
    pub status: CaseStatus,
}

impl ExecutionResult {
    fn new(elapsed: Duration, status: CaseStatus) -> Self {
        Self { elapsed, status }
    }
}

/// Interval between child liveness polls while waiting out the deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Run one case: spawn `executable input parameter`, wait with a bounded
/// deadline, then diff the captured output against the golden file.
///
/// Every failure mode is folded into the returned `CaseStatus`; a bad
/// case never aborts the remaining ones.
pub fn run_case(executable: &Path, case: &TestCase, timeout: Duration) -> ExecutionResult {
    let input = case.input_path();
    if !input.exists() {
        return ExecutionResult::new(Duration::ZERO, CaseStatus::MissingInput { path: input });
    }

    // Freshly created/truncated each run, never read before being written.
    let actual = case.actual_path();
    let outfile = match File::create(&actual) {
        Ok(f) => f,
        Err(e) => {
            return ExecutionResult::new(
                Duration::ZERO,
                CaseStatus::CompareError {
                    message: format!("cannot create {}: {}", actual.display(), e),
                },
            );
        }
    };

    let start = Instant::now();
    let mut child = match Command::new(executable)
        .arg(&input)
        .arg(&case.parameter)
        .stdout(Stdio::from(outfile))
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(c) => c,
        Err(e) => {
            return ExecutionResult::new(
                start.elapsed(),
                CaseStatus::ExecFailed {
                    code: None,
                    stderr: format!("failed to spawn {}: {}", executable.display(), e),
                },
            );
        }
    };

    let deadline = start + timeout;
    let exit_status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return ExecutionResult::new(start.elapsed(), CaseStatus::TimedOut { limit: timeout });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return ExecutionResult::new(
                    start.elapsed(),
                    CaseStatus::ExecFailed {
                        code: None,
                        stderr: format!("wait failed: {}", e),
                    },
                );
            }
        }
    };
    let elapsed = start.elapsed();

    if !exit_status.success() {
        let mut stderr = String::new();
        if let Some(mut pipe) = child.stderr.take() {
            let _ = pipe.read_to_string(&mut stderr);
        }
        return ExecutionResult::new(
            elapsed,
            CaseStatus::ExecFailed {
                code: exit_status.code(),
                stderr,
            },
        );
    }

    let status = match compare::compare(&case.expected_path(), &actual) {
        Ok(cmp) if cmp.passed() => CaseStatus::Passed,
        Ok(cmp) => CaseStatus::Failed { diff: cmp.output },
        Err(e) => CaseStatus::CompareError { message: e.to_string() },
    };
    ExecutionResult::new(elapsed, status)
}
