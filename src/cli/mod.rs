//! CLI for the life3d test harness
//!
//! One positional argument selects the build variant to compile and test.
//! Bad arity or an unrecognized selector is rejected by clap with a usage
//! message listing the valid selectors and a non-zero exit, before the
//! build invoker ever runs.
//!
//! ## Exit codes
//!
//! - `0` - every case passed
//! - `1` - at least one case failed or errored
//! - `2` - nothing ran: usage error, unimplemented variant, build
//!   failure, or unreadable fixture directory
//!
//! ## Design
//!
//! Command functions return `CliResult<T>` instead of calling
//! `process::exit`. Only the top-level `run()` function handles errors
//! and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use crate::harness::report::ConsoleReporter;
use crate::harness::suite::{self, SuiteConfig};
use crate::harness::variant::{self, Selector};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    /// Every case passed
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// At least one case failed or errored
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Nothing ran (usage error, unimplemented variant, build failure)
    pub const ABORTED: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// A run that completed but had failing or errored cases.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// A run that never got as far as executing a case.
    pub fn aborted(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::ABORTED)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Golden-output test harness for life3d build variants
#[derive(Parser, Debug)]
#[command(name = "life3d-harness")]
#[command(version)]
#[command(about = "Golden-output test harness for life3d build variants", long_about = None)]
pub struct Cli {
    /// Build variant to compile and test
    #[arg(value_enum, value_name = "VARIANT")]
    pub variant: Selector,

    /// Directory holding fixtures (name.in / name.steps.out pairs)
    #[arg(long, value_name = "DIR", default_value = "tests")]
    pub fixtures: PathBuf,

    /// Directory holding the simulator sources
    #[arg(long = "src", value_name = "DIR", default_value = ".")]
    pub src_dir: PathBuf,

    /// Per-case execution timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 120)]
    pub timeout: u64,

    /// Print the build command before running it
    #[arg(short, long)]
    pub verbose: bool,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. `Cli::parse()`
/// itself exits non-zero on bad usage, listing the valid selectors.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Resolve the variant, build it, run the suite, and map the summary to
/// an exit code.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let variant = variant::resolve(cli.variant, &cli.src_dir, &cli.fixtures)
        .map_err(|e| CliError::aborted(e.to_string()))?;
    tracing::info!("testing variant '{}'", variant.selector);

    let config = SuiteConfig {
        fixture_dir: cli.fixtures,
        timeout: Duration::from_secs(cli.timeout),
    };
    let mut reporter = ConsoleReporter::new(cli.verbose);

    let summary = suite::run_suite(&variant, &config, &mut reporter)
        .map_err(|e| CliError::aborted(e.to_string()))?;

    if summary.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        // Per-case diagnostics and the summary are already printed.
        Err(CliError::failure(""))
    }
}

// ============================================================================
// Tests
// ============================================================================
