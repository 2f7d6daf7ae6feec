//! Invocation of the external schema compiler.
//!
//! Each schema file is compiled on its own with
//! `protoc [-I<dir>...] --go_out=<target-root>/<package> <file>`, in discovery
//! order. The first failure stops the run.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::discover::SchemaFile;
use crate::error::{Error, Result};
use crate::pipeline::{BuildStats, BuildWarning};
use crate::resolve::{self, ResolutionTable};

/// Program run when no compiler is configured.
pub const DEFAULT_PROTOC: &str = "protoc";

/// A configured compiler command line.
#[derive(Debug, Clone)]
pub struct Compiler {
    program: String,
    include_paths: Vec<PathBuf>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(DEFAULT_PROTOC)
    }
}

impl Compiler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            include_paths: Vec::new(),
        }
    }

    /// Add an include path, passed as `-I<path>`.
    pub fn include(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_paths.push(path.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Build the command compiling `source` into `out_dir`.
    pub fn command(&self, source: &Path, out_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        for include in &self.include_paths {
            let mut arg = OsString::from("-I");
            arg.push(include);
            cmd.arg(arg);
        }
        let mut out_arg = OsString::from("--go_out=");
        out_arg.push(out_dir);
        cmd.arg(out_arg).arg(source);
        cmd
    }

    /// Compile one file, waiting for the compiler to exit.
    pub fn compile(&self, source: &Path, out_dir: &Path) -> Result<()> {
        let output = self
            .command(source, out_dir)
            .output()
            .map_err(|e| Error::CompilerLaunch {
                program: self.program.clone(),
                source: e,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(Error::CompilerFailed {
                file: source.to_path_buf(),
                status: output.status,
                stderr: stderr.into_owned(),
            });
        }
        if !stderr.trim().is_empty() {
            tracing::debug!(file = %source.display(), stderr = %stderr.trim(), "compiler output");
        }
        Ok(())
    }
}

/// Output directory for a file in `package`; the target root itself when
/// the file declared no package.
pub fn output_dir(target_root: &Path, package: Option<&str>) -> PathBuf {
    match package {
        Some(package) => resolve::package_dir(target_root, package),
        None => target_root.to_path_buf(),
    }
}

/// Compile every file in `files` into its package directory.
///
/// Files with no package are still compiled, into the target root, and
/// reported as [`BuildWarning::UnpackagedFile`].
pub fn compile_all(
    files: &[SchemaFile],
    table: &ResolutionTable,
    target_root: &Path,
    compiler: &Compiler,
    stats: &mut BuildStats,
) -> Result<()> {
    for file in files {
        let package = table.get(&file.name);
        if package.is_none() {
            stats.warn(BuildWarning::UnpackagedFile {
                file: file.path.clone(),
            });
        }

        let out_dir = output_dir(target_root, package);
        tracing::debug!(file = %file.path.display(), out = %out_dir.display(), "compiling");
        compiler.compile(&file.path, &out_dir)?;
        stats.files_compiled += 1;
    }

    Ok(())
}
