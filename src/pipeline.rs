//! The build pipeline: discover, resolve, rewrite, copy, compile.
//!
//! Every stage runs over the whole file set before the next one starts. In
//! particular no file is rewritten or compiled until every package has been
//! resolved, since any file may import any other.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::compile::{self, Compiler};
use crate::copy;
use crate::discover::{self, SchemaFile};
use crate::error::{Error, Result};
use crate::resolve::{self, ResolutionTable};
use crate::rewrite;
use crate::syntax::PROTO_EXTENSION;

/// Output root used when none is configured.
pub const DEFAULT_OUT_DIR: &str = "protobuf";

/// Inputs for one build run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory scanned for `.proto` files. Files are rewritten in place.
    pub source_dir: PathBuf,
    /// Output root; one subdirectory per package is created under it.
    pub out_dir: PathBuf,
    pub compiler: Compiler,
    /// Fail on imports whose target declares no package instead of
    /// rewriting them with an empty package segment.
    pub strict: bool,
    /// Copy each rewritten source into its package directory.
    pub copy_sources: bool,
}

impl BuildOptions {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            compiler: Compiler::default(),
            strict: false,
            copy_sources: false,
        }
    }
}

/// A non-fatal problem found during a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildWarning {
    /// An import names a file that declared no package. The import was
    /// rewritten with an empty package segment.
    UnresolvedImport { file: PathBuf, import: String },
    /// A file declared no package and was compiled into the output root.
    UnpackagedFile { file: PathBuf },
    /// Two files with the same base name declared different packages.
    PackageConflict {
        name: String,
        previous: String,
        current: String,
    },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedImport { file, import } => write!(
                f,
                "{}: no package known for import '{import}', rewritten with an empty package segment",
                file.display()
            ),
            Self::UnpackagedFile { file } => write!(
                f,
                "{}: no go_package declared, compiling into the output root",
                file.display()
            ),
            Self::PackageConflict {
                name,
                previous,
                current,
            } => write!(
                f,
                "{name} declared in both '{previous}' and '{current}', using '{current}'"
            ),
        }
    }
}

/// Counters collected while building, for reporting.
#[derive(Debug, Default, Serialize)]
pub struct BuildStats {
    pub files_discovered: usize,
    pub packages_resolved: usize,
    pub files_without_package: usize,
    pub imports_rewritten: usize,
    pub imports_already_qualified: usize,
    pub files_copied: usize,
    pub files_compiled: usize,
    pub warnings: Vec<BuildWarning>,
}

impl BuildStats {
    /// Log and record a warning.
    pub fn warn(&mut self, warning: BuildWarning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }
}

/// Everything a successful build produced.
#[derive(Debug)]
pub struct BuildOutcome {
    pub files: Vec<SchemaFile>,
    pub table: ResolutionTable,
    pub stats: BuildStats,
}

/// Run the whole pipeline.
///
/// The output root is created first. A missing source directory is reported
/// after that but before any package directory exists or any file is touched.
/// Errors abort the run without undoing earlier stages.
pub fn build(options: &BuildOptions) -> Result<BuildOutcome> {
    let out_dir = &options.out_dir;
    std::fs::create_dir_all(out_dir).map_err(|e| Error::CreateDir {
        path: out_dir.clone(),
        source: e,
    })?;

    let mut stats = BuildStats::default();

    tracing::info!(source = %options.source_dir.display(), "scanning for schema files");
    let files = discover::find_schema_files(&options.source_dir, PROTO_EXTENSION)?;
    stats.files_discovered = files.len();

    let table = resolve::resolve_packages(&files, out_dir, &mut stats)?;
    tracing::info!(
        packages = stats.packages_resolved,
        unpackaged = stats.files_without_package,
        "resolved packages"
    );

    rewrite::rewrite_imports(&files, &table, options.strict, &mut stats)?;
    tracing::info!(
        rewritten = stats.imports_rewritten,
        already_qualified = stats.imports_already_qualified,
        "rewrote imports"
    );

    if options.copy_sources {
        copy::copy_sources(&files, &table, out_dir, &mut stats)?;
        tracing::info!(copied = stats.files_copied, "copied sources");
    }

    compile::compile_all(&files, &table, out_dir, &options.compiler, &mut stats)?;
    tracing::info!(
        compiled = stats.files_compiled,
        compiler = options.compiler.program(),
        "compiled schema files"
    );

    Ok(BuildOutcome {
        files,
        table,
        stats,
    })
}
