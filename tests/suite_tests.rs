//! End-to-end tests for the harness orchestration
//!
//! These drive `run_suite` against a stand-in simulator (a shell script
//! honoring the `executable <input> <generations>` contract) so the whole
//! pipeline is exercised without needing a C++ toolchain.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use life3d_harness::harness::error::HarnessError;
use life3d_harness::harness::report::{RunSummary, SuiteReporter};
use life3d_harness::harness::runner::ExecutionResult;
use life3d_harness::harness::suite::{SuiteConfig, run_suite};
use life3d_harness::harness::variant::Variant;
use life3d_harness::TestCase;

/// Reporter that records every callback for later assertions.
#[derive(Default)]
struct RecordingReporter {
    build_commands: Vec<String>,
    collected: Option<usize>,
    invocations: Vec<String>,
    outcomes: Vec<String>,
    summaries: Vec<(usize, usize, usize)>,
}

impl SuiteReporter for RecordingReporter {
    fn on_build_start(&mut self, command_line: &str) {
        self.build_commands.push(command_line.to_string());
    }

    fn on_collection_complete(&mut self, case_count: usize) {
        self.collected = Some(case_count);
    }

    fn on_case_start(&mut self, invocation: &str) {
        self.invocations.push(invocation.to_string());
    }

    fn on_case_complete(&mut self, _case: &TestCase, result: &ExecutionResult) {
        // Monotonic clock: elapsed can never be negative.
        assert!(result.elapsed >= Duration::ZERO);
        self.outcomes.push(format!("{:?}", result.status));
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        self.summaries.push((summary.passed, summary.failed, summary.errored));
    }
}

fn setup(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("life3d_harness_suite_{tag}"));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

/// A variant whose "build" trivially succeeds and whose executable is a
/// pre-written stand-in simulator.
fn fake_variant(executable: PathBuf) -> Variant {
    Variant {
        selector: "fake".to_string(),
        build_command: vec!["true".to_string()],
        executable,
    }
}

fn config(dir: &Path) -> SuiteConfig {
    SuiteConfig {
        fixture_dir: dir.to_path_buf(),
        timeout: Duration::from_secs(10),
    }
}

#[test]
fn all_passing_run_is_deterministic() {
    let dir = setup("pass");
    // Simulator echoes its input followed by the generation count.
    let sim = dir.join("sim");
    write_script(&sim, "cat \"$1\"; echo \"$2\"");

    for (name, param, board) in [("count", "5", "board-a\n"), ("glider", "12", "board-b\n")] {
        fs::write(dir.join(format!("{name}.in")), board).unwrap();
        fs::write(dir.join(format!("{name}.{param}.out")), format!("{board}{param}\n")).unwrap();
    }

    let variant = fake_variant(sim);
    let mut reporter = RecordingReporter::default();
    let summary = run_suite(&variant, &config(&dir), &mut reporter).unwrap();

    assert_eq!((summary.passed, summary.failed, summary.errored), (2, 0, 0));
    assert!(summary.all_passed());
    assert_eq!(reporter.collected, Some(2));
    assert_eq!(reporter.build_commands, vec!["true".to_string()]);
    // Discovery order is lexical, so invocations are stable across runs.
    assert!(reporter.invocations[0].contains("count.in"));
    assert!(reporter.invocations[1].contains("glider.in"));

    let first = fs::read(dir.join("count.5.myout")).unwrap();

    // Second run over unchanged inputs rewrites identical actual output.
    let mut reporter = RecordingReporter::default();
    let summary = run_suite(&variant, &config(&dir), &mut reporter).unwrap();
    assert!(summary.all_passed());
    assert_eq!(fs::read(dir.join("count.5.myout")).unwrap(), first);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn per_case_failures_do_not_abort_the_run() {
    let dir = setup("mixed");
    let sim = dir.join("sim");
    write_script(&sim, "cat \"$1\"");

    // Passing case.
    fs::write(dir.join("good.in"), "same\n").unwrap();
    fs::write(dir.join("good.3.out"), "same\n").unwrap();
    // Failing case: golden output differs.
    fs::write(dir.join("drift.in"), "actual\n").unwrap();
    fs::write(dir.join("drift.3.out"), "expected\n").unwrap();
    // Errored case: golden output present but input fixture missing.
    fs::write(dir.join("orphan.3.out"), "whatever\n").unwrap();

    let mut reporter = RecordingReporter::default();
    let summary = run_suite(&fake_variant(sim), &config(&dir), &mut reporter).unwrap();

    assert_eq!((summary.passed, summary.failed, summary.errored), (1, 1, 1));
    // All three cases were attempted despite the failures.
    assert_eq!(reporter.invocations.len(), 3);
    assert_eq!(reporter.outcomes.len(), 3);
    assert_eq!(reporter.summaries, vec![(1, 1, 1)]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn failed_build_aborts_before_any_case() {
    let dir = setup("badbuild");
    fs::write(dir.join("count.in"), "board\n").unwrap();
    fs::write(dir.join("count.5.out"), "board\n").unwrap();

    let variant = Variant {
        selector: "fake".to_string(),
        build_command: vec!["false".to_string()],
        executable: dir.join("never-built"),
    };

    let mut reporter = RecordingReporter::default();
    let err = run_suite(&variant, &config(&dir), &mut reporter).unwrap_err();

    assert!(matches!(err, HarnessError::BuildFailed { .. }));
    // Nothing past the build happened: no discovery, no cases, no output.
    assert_eq!(reporter.collected, None);
    assert!(reporter.invocations.is_empty());
    assert!(!dir.join("count.5.myout").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_fixture_names_are_skipped() {
    let dir = setup("malformed");
    let sim = dir.join("sim");
    write_script(&sim, "cat \"$1\"");

    fs::write(dir.join("good.2.in"), "x\n").unwrap();
    fs::write(dir.join("good.2.out"), "x\n").unwrap();
    fs::write(dir.join("good.in"), "x\n").unwrap();
    // Extra embedded separator: rejected, not truncated to ("good", "2").
    fs::write(dir.join("good.2.stray.out"), "x\n").unwrap();
    // No parameter token at all.
    fs::write(dir.join("bare.out"), "x\n").unwrap();

    let mut reporter = RecordingReporter::default();
    let summary = run_suite(&fake_variant(sim), &config(&dir), &mut reporter).unwrap();

    assert_eq!(reporter.collected, Some(1));
    assert_eq!(summary.total(), 1);
    assert_eq!(summary.passed, 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn empty_fixture_dir_is_a_clean_run() {
    let dir = setup("empty");
    let sim = dir.join("sim");
    write_script(&sim, "cat \"$1\"");

    let mut reporter = RecordingReporter::default();
    let summary = run_suite(&fake_variant(sim), &config(&dir), &mut reporter).unwrap();

    assert_eq!(summary.total(), 0);
    assert!(summary.all_passed());
    assert_eq!(reporter.collected, Some(0));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn timed_out_case_is_killed_and_the_run_continues() {
    let dir = setup("hang");
    let sim = dir.join("sim");
    // Hang on the first fixture only; behave for the rest.
    write_script(&sim, "case \"$1\" in */hang.in) sleep 30;; *) cat \"$1\";; esac");

    fs::write(dir.join("hang.in"), "x\n").unwrap();
    fs::write(dir.join("hang.1.out"), "x\n").unwrap();
    fs::write(dir.join("quick.in"), "y\n").unwrap();
    fs::write(dir.join("quick.1.out"), "y\n").unwrap();

    let config = SuiteConfig {
        fixture_dir: dir.clone(),
        timeout: Duration::from_millis(200),
    };

    let mut reporter = RecordingReporter::default();
    let summary = run_suite(&fake_variant(sim), &config, &mut reporter).unwrap();

    assert_eq!((summary.passed, summary.failed, summary.errored), (1, 0, 1));
    assert!(reporter.outcomes[0].contains("TimedOut"));

    let _ = fs::remove_dir_all(&dir);
}
