use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use proto_pkg_build::compile::{Compiler, DEFAULT_PROTOC};
use proto_pkg_build::pipeline::{self, BuildOptions, DEFAULT_OUT_DIR};
use proto_pkg_build::report::{self, BuildReport};

/// Compile .proto files into per-package Go output directories.
///
/// Every .proto file under SOURCE_DIR is compiled into
/// <out-dir>/<go_package>. Import statements are rewritten in place to point
/// at the imported file's package directory before compiling.
#[derive(Parser)]
#[command(name = "proto-pkg-build", version, about)]
struct Cli {
    /// Directory to scan for .proto files.
    source_dir: Option<PathBuf>,

    /// Output root; one subdirectory is created per go_package.
    #[arg(long, default_value = DEFAULT_OUT_DIR, env = "PROTO_PKG_BUILD_OUT_DIR")]
    out_dir: PathBuf,

    /// Schema compiler to run.
    #[arg(long, default_value = DEFAULT_PROTOC, env = "PROTOC")]
    protoc: String,

    /// Include path passed to the compiler as -I<DIR>. May be repeated.
    #[arg(short = 'I', long = "proto-path", value_name = "DIR")]
    proto_paths: Vec<PathBuf>,

    /// Fail when an import names a file with no go_package.
    #[arg(long)]
    strict: bool,

    /// Copy each rewritten .proto file into its package directory.
    #[arg(long)]
    copy_sources: bool,

    /// Write a JSON build report to this path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Suppress non-error output.
    #[arg(long, short)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");

        // Print cause chain.
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = std::error::Error::source(cause);
        }

        process::exit(1);
    }
}

fn init_tracing(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> proto_pkg_build::error::Result<()> {
    let Some(source_dir) = cli.source_dir else {
        eprintln!("Need to provide source directory as an argument");
        return Ok(());
    };

    let compiler = cli
        .proto_paths
        .into_iter()
        .fold(Compiler::new(cli.protoc), |compiler, path| compiler.include(path));

    let options = BuildOptions {
        source_dir,
        out_dir: cli.out_dir,
        compiler,
        strict: cli.strict,
        copy_sources: cli.copy_sources,
    };

    let outcome = pipeline::build(&options)?;

    let stats = &outcome.stats;
    tracing::info!(
        "Done: {} files, {} packages, {} imports rewritten, {} compiled, {} warnings",
        stats.files_discovered,
        stats.packages_resolved,
        stats.imports_rewritten,
        stats.files_compiled,
        stats.warnings.len()
    );

    if let Some(path) = &cli.report {
        let report = BuildReport::new(&outcome, &options.source_dir, &options.out_dir);
        report::write_report(&report, path)?;
        tracing::info!(path = %path.display(), "wrote build report");
    }

    Ok(())
}
