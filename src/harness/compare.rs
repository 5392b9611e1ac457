//! Output comparator: byte-level diff of actual vs. golden output
//!
//! Comparison is delegated to the external `diff` utility; empty captured
//! stdout means the files are byte-identical. Neither file is modified.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

const DIFF_TOOL: &str = "diff";

#[derive(Debug, Error)]
pub enum CompareError {
    /// Expected or actual file absent at compare time. Caught here rather
    /// than delegated to the external tool, whose output for a missing
    /// file would be ambiguous.
    #[error("comparison input missing: {0}")]
    InputMissing(PathBuf),

    #[error("failed to run diff: {0}")]
    Tool(#[from] std::io::Error),
}

/// Raw comparator output. Empty means byte equality.
#[derive(Debug)]
pub struct Comparison {
    pub output: String,
}

impl Comparison {
    /// Exact derivation: passed iff the comparator produced no output.
    pub fn passed(&self) -> bool {
        self.output.is_empty()
    }
}

/// Invoke byte comparison between `expected` and `actual`.
pub fn compare(expected: &Path, actual: &Path) -> Result<Comparison, CompareError> {
    for path in [expected, actual] {
        if !path.exists() {
            return Err(CompareError::InputMissing(path.to_path_buf()));
        }
    }

    let output = Command::new(DIFF_TOOL).arg(expected).arg(actual).output()?;
    Ok(Comparison {
        output: String::from_utf8_lossy(&output.stdout).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_pair(tag: &str, expected: &str, actual: &str) -> (PathBuf, PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("life3d_harness_compare_{tag}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let e = dir.join("expected.out");
        let a = dir.join("actual.myout");
        fs::write(&e, expected).unwrap();
        fs::write(&a, actual).unwrap();
        (dir, e, a)
    }

    #[test]
    fn identical_files_pass() {
        let (dir, e, a) = temp_pair("eq", "1 2 3\n", "1 2 3\n");
        let cmp = compare(&e, &a).unwrap();
        assert!(cmp.passed());
        assert!(cmp.output.is_empty());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn differing_files_fail_with_output() {
        let (dir, e, a) = temp_pair("ne", "1 2 3\n", "1 2 4\n");
        let cmp = compare(&e, &a).unwrap();
        assert!(!cmp.passed());
        assert!(!cmp.output.is_empty());
        // Inputs are left untouched by the comparison.
        assert_eq!(fs::read_to_string(&e).unwrap(), "1 2 3\n");
        assert_eq!(fs::read_to_string(&a).unwrap(), "1 2 4\n");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_input_is_reported_before_invoking_diff() {
        let (dir, e, a) = temp_pair("missing", "x\n", "x\n");
        fs::remove_file(&a).unwrap();
        let err = compare(&e, &a).unwrap_err();
        assert!(matches!(err, CompareError::InputMissing(ref p) if *p == a));
        let _ = fs::remove_dir_all(&dir);
    }
}
