//! Variant registry and build invocation
//!
//! The simulator ships in a small closed set of build configurations that
//! differ only in source file and compiler flags. The registry is a static
//! table rather than a branch ladder so adding a variant never touches the
//! case runner.

use std::path::{Path, PathBuf};
use std::process::Command;

use clap::ValueEnum;

use crate::harness::error::HarnessError;

/// Selector for the closed set of simulator build configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Selector {
    /// Single-threaded reference build
    Serial,
    /// Shared-memory parallel build (OpenMP)
    Openmp,
    /// Distributed parallel build (MPI)
    Mpi,
}

impl Selector {
    pub fn as_str(self) -> &'static str {
        match self {
            Selector::Serial => "serial",
            Selector::Openmp => "openmp",
            Selector::Mpi => "mpi",
        }
    }
}

struct VariantSpec {
    selector: Selector,
    source: &'static str,
    exe: &'static str,
    extra_flags: &'static [&'static str],
    /// A selector whose build command is not yet defined is rejected at
    /// lookup time, never discovered later as a build failure.
    implemented: bool,
}

const COMPILER: &str = "g++";
const STD_FLAG: &str = "-std=c++11";

const VARIANTS: &[VariantSpec] = &[
    VariantSpec {
        selector: Selector::Serial,
        source: "life3d.cpp",
        exe: "life3d",
        extra_flags: &[],
        implemented: true,
    },
    VariantSpec {
        selector: Selector::Openmp,
        source: "life3d-omp.cpp",
        exe: "life3d-omp",
        extra_flags: &["-fopenmp"],
        implemented: true,
    },
    // The MPI build invocation (mpicc wrapper, launcher args) is not
    // defined yet; resolve() reports that instead of guessing one.
    VariantSpec {
        selector: Selector::Mpi,
        source: "life3d-mpi.cpp",
        exe: "life3d-mpi",
        extra_flags: &[],
        implemented: false,
    },
];

/// A resolved build configuration: the command that produces the simulator
/// executable and the path the executable lands at.
///
/// Fields are public so tests can substitute a stand-in program without
/// going through the registry.
#[derive(Debug, Clone)]
pub struct Variant {
    pub selector: String,
    pub build_command: Vec<String>,
    pub executable: PathBuf,
}

/// Look up `selector` in the registry and resolve its build command
/// against the given source and output directories.
///
/// The executable is placed in `out_dir` (conventionally the fixture
/// directory, which is where the original test layout compiled to).
pub fn resolve(selector: Selector, src_dir: &Path, out_dir: &Path) -> Result<Variant, HarnessError> {
    let spec = VARIANTS
        .iter()
        .find(|s| s.selector == selector)
        .expect("INVARIANT: every selector has a registry entry");

    if !spec.implemented {
        return Err(HarnessError::NotImplemented(selector.as_str().to_string()));
    }

    let executable = out_dir.join(spec.exe);
    let mut build_command = vec![COMPILER.to_string()];
    build_command.extend(spec.extra_flags.iter().map(|f| (*f).to_string()));
    build_command.push(src_dir.join(spec.source).to_string_lossy().into_owned());
    build_command.push("-o".to_string());
    build_command.push(executable.to_string_lossy().into_owned());
    build_command.push(STD_FLAG.to_string());

    Ok(Variant {
        selector: spec.selector.as_str().to_string(),
        build_command,
        executable,
    })
}

impl Variant {
    /// Run the build command once, checking its exit status.
    ///
    /// Non-zero exit is `BuildFailed` and aborts the run before any case
    /// is attempted; the build tool's stderr is carried in the error.
    pub fn build(&self) -> Result<(), HarnessError> {
        let (program, args) = self
            .build_command
            .split_first()
            .ok_or_else(|| HarnessError::NotImplemented(self.selector.clone()))?;

        let output = Command::new(program).args(args).output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(HarnessError::BuildFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        }
    }

    /// The build command as a single display string.
    pub fn command_line(&self) -> String {
        self.build_command.join(" ")
    }
}
