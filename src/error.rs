//! Error types for the proto-pkg-build crate.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors that abort a build run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source directory given on the command line does not exist.
    #[error("no directory named '{0}' found; please create said directory")]
    SourceDirMissing(PathBuf),

    /// Walking the source tree failed.
    #[error("could not list {extension} files under {root}")]
    Discovery {
        root: PathBuf,
        extension: String,
        source: walkdir::Error,
    },

    /// The walk succeeded but found nothing to compile.
    #[error("looks like there aren't any {extension} files under {root}")]
    NoFilesFound { root: PathBuf, extension: String },

    /// Failed to read a schema file from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a rewritten schema file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create an output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to copy a schema file into its package directory.
    #[error("could not copy {from} to package directory {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// An import names a file with no known package (strict mode only).
    #[error("{file}: import of '{import}' has no known package")]
    UnresolvedImport { file: PathBuf, import: String },

    /// The compiler process could not be started.
    #[error("could not launch compiler '{program}': {source}")]
    CompilerLaunch {
        program: String,
        source: std::io::Error,
    },

    /// The compiler ran and reported failure.
    #[error("could not compile {file} ({status}){}", format_stderr(.stderr))]
    CompilerFailed {
        file: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    /// Failed to serialize or write the build report.
    #[error("report error: {0}")]
    Report(String),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
