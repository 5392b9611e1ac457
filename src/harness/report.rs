//! Result reporting
//!
//! ## SuiteReporter Trait
//!
//! The orchestrator reports through the `SuiteReporter` trait to separate
//! rendering from execution, so alternative output formats (JSON, TAP,
//! etc.) can be added without touching the runner.

use std::time::Duration;

use crate::harness::fixtures::TestCase;
use crate::harness::runner::{CaseStatus, ExecutionResult};

/// Aggregate counts for a finished run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub passed: usize,
    /// Ran to completion but produced output differing from the golden file
    pub failed: usize,
    /// Could not be compared: abnormal exit, timeout, or missing input
    pub errored: usize,
    pub duration: Duration,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errored
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }
}

/// Trait for reporting suite execution progress and results.
pub trait SuiteReporter {
    /// Called once before the variant's build command runs
    fn on_build_start(&mut self, _command_line: &str) {}

    /// Called when fixture discovery is complete
    fn on_collection_complete(&mut self, case_count: usize);

    /// Called with the exact invocation before a case runs
    fn on_case_start(&mut self, invocation: &str);

    /// Called when a case completes
    fn on_case_complete(&mut self, case: &TestCase, result: &ExecutionResult);

    /// Called when all cases have completed
    fn on_run_complete(&mut self, summary: &RunSummary);
}

const RED: &str = "\x1b[1;31m";
const GREEN: &str = "\x1b[0;32m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[;1m";
const RESET: &str = "\x1b[0;0m";

/// Default console reporter.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl SuiteReporter for ConsoleReporter {
    fn on_build_start(&mut self, command_line: &str) {
        if self.verbose {
            println!("{BOLD}{command_line}{RESET}");
        }
    }

    fn on_collection_complete(&mut self, case_count: usize) {
        if case_count == 0 {
            eprintln!("No fixtures collected");
        } else {
            println!("collected {} case(s)", case_count);
        }
    }

    fn on_case_start(&mut self, invocation: &str) {
        println!("{BOLD}{invocation}{RESET}");
    }

    fn on_case_complete(&mut self, _case: &TestCase, result: &ExecutionResult) {
        println!("Time passed: {:.4}s", result.elapsed.as_secs_f64());
        match &result.status {
            CaseStatus::Passed => println!("{GREEN}Test successful{RESET}"),
            CaseStatus::Failed { diff } => {
                println!("{RED}Test failed{RESET}");
                print!("{diff}");
            }
            CaseStatus::ExecFailed { code, stderr } => {
                let code = code.map_or_else(|| "killed by signal".to_string(), |c| format!("exit {c}"));
                println!("{RED}Test errored ({code}){RESET}");
                if !stderr.is_empty() {
                    eprint!("{stderr}");
                }
            }
            CaseStatus::TimedOut { limit } => {
                println!("{RED}Test timed out after {:.0}s{RESET}", limit.as_secs_f64());
            }
            CaseStatus::MissingInput { path } => {
                println!("{YELLOW}Test errored: input fixture {} missing{RESET}", path.display());
            }
            CaseStatus::CompareError { message } => {
                println!("{RED}Test errored: {message}{RESET}");
            }
        }
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        let mut parts = Vec::new();
        if summary.passed > 0 {
            parts.push(format!("{GREEN}{} passed{RESET}", summary.passed));
        }
        if summary.failed > 0 {
            parts.push(format!("{RED}{} failed{RESET}", summary.failed));
        }
        if summary.errored > 0 {
            parts.push(format!("{YELLOW}{} errored{RESET}", summary.errored));
        }
        if parts.is_empty() {
            parts.push("no cases run".to_string());
        }

        println!();
        println!(
            "====== {} in {:.2}s ======",
            parts.join(", "),
            summary.duration.as_secs_f64()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts() {
        let summary = RunSummary {
            passed: 3,
            failed: 1,
            errored: 2,
            duration: Duration::from_secs(1),
        };
        assert_eq!(summary.total(), 6);
        assert!(!summary.all_passed());
    }

    #[test]
    fn all_passed_requires_no_failures_and_no_errors() {
        let clean = RunSummary {
            passed: 2,
            ..Default::default()
        };
        assert!(clean.all_passed());

        let errored = RunSummary {
            passed: 2,
            errored: 1,
            ..Default::default()
        };
        assert!(!errored.all_passed());
    }

    #[test]
    fn empty_run_counts_as_all_passed() {
        // "Nothing ran" vs. "something failed" is distinguished by the CLI
        // exit-code taxonomy, not by the summary itself.
        assert!(RunSummary::default().all_passed());
        assert_eq!(RunSummary::default().total(), 0);
    }
}
