//! Fixture catalog: discovers test cases from the fixture directory
//!
//! A fixture is a pair of files sharing a base name: `name.in` holds the
//! input board and `name.steps.out` holds the golden output after `steps`
//! generations. Discovery enumerates the `.out` files; the input path is
//! derived, not scanned for. The case's own output is written next to the
//! golden file with a distinct `.myout` extension so the golden fixture is
//! never overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use crate::harness::error::HarnessError;

pub const INPUT_EXT: &str = "in";
pub const EXPECTED_EXT: &str = "out";
pub const ACTUAL_EXT: &str = "myout";

/// One discovered fixture. Immutable after discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Base name shared by the input and expected-output files
    pub name: String,
    /// Generation count embedded in the expected-output filename, passed
    /// verbatim as the simulator's second argument
    pub parameter: String,
    dir: PathBuf,
}

impl TestCase {
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter: parameter.into(),
            dir: dir.into(),
        }
    }

    /// `name.in` - the simulator's input board
    pub fn input_path(&self) -> PathBuf {
        self.dir.join(format!("{}.{}", self.name, INPUT_EXT))
    }

    /// `name.parameter.out` - the golden output (read-only)
    pub fn expected_path(&self) -> PathBuf {
        self.dir.join(format!("{}.{}.{}", self.name, self.parameter, EXPECTED_EXT))
    }

    /// `name.parameter.myout` - freshly overwritten on every run
    pub fn actual_path(&self) -> PathBuf {
        self.dir.join(format!("{}.{}.{}", self.name, self.parameter, ACTUAL_EXT))
    }
}

/// Split an expected-output file stem into its `name` and `parameter`.
///
/// A conforming stem is exactly `name.parameter` with both halves
/// non-empty. Extra embedded separators are rejected rather than silently
/// truncated, so a nonconforming filename surfaces as a diagnostic instead
/// of a case with the wrong identity.
pub fn parse_fixture_stem(stem: &str) -> Option<(&str, &str)> {
    let mut tokens = stem.split('.');
    let name = tokens.next()?;
    let parameter = tokens.next()?;
    if tokens.next().is_some() || name.is_empty() || parameter.is_empty() {
        return None;
    }
    Some((name, parameter))
}

/// Scan `dir` for golden-output fixtures.
///
/// Returns cases in lexical filename order so runs are reproducible.
/// Malformed `.out` names are skipped with a warning; only an unreadable
/// directory aborts.
pub fn discover_cases(dir: &Path) -> Result<Vec<TestCase>, HarnessError> {
    let entries = fs::read_dir(dir).map_err(|e| HarnessError::FixtureDir(dir.to_path_buf(), e))?;

    let mut file_names: Vec<String> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if path.extension().is_some_and(|ext| ext == EXPECTED_EXT) {
            if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                file_names.push(file_name.to_string());
            }
        }
    }
    file_names.sort();

    let mut cases = Vec::new();
    for file_name in &file_names {
        let stem = file_name.strip_suffix(EXPECTED_EXT).and_then(|s| s.strip_suffix('.'));
        match stem.and_then(parse_fixture_stem) {
            Some((name, parameter)) => cases.push(TestCase::new(dir, name, parameter)),
            None => {
                tracing::warn!("skipping malformed fixture name '{}'", file_name);
            }
        }
    }

    tracing::debug!("discovered {} fixture(s) in {}", cases.len(), dir.display());
    Ok(cases)
}
