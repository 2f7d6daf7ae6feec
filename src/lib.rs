//! Compile `.proto` files into per-package Go output directories.
//!
//! `proto-pkg-build` scans a source tree for `.proto` files, reads the
//! `option go_package = "...";` line of each, and compiles every file with
//! `protoc --go_out=<out>/<package>`. Before compiling, each file's import
//! statement is rewritten to point into the imported file's package
//! directory, so `import "invoice.proto";` becomes
//! `import "billing/invoice.proto";` when `invoice.proto` declares
//! `billing`.
//!
//! # Pipeline
//!
//! 1. [`discover`]: recursively list `.proto` files, in a stable order
//! 2. [`resolve`]: build the file name → package [`resolve::ResolutionTable`]
//!    and create one output directory per package
//! 3. [`rewrite`]: rewrite the first import line of each file, in place
//! 4. [`copy`]: optionally copy the rewritten sources into their packages
//! 5. [`compile`]: run the compiler once per file
//!
//! Only two lines of schema syntax are understood; see [`syntax`].
//!
//! # Usage
//!
//! ```no_run
//! use proto_pkg_build::compile::Compiler;
//! use proto_pkg_build::pipeline::{self, BuildOptions};
//!
//! let mut options = BuildOptions::new("schemas/");
//! options.compiler = Compiler::new("protoc").include("schemas/");
//! let outcome = pipeline::build(&options)?;
//! eprintln!(
//!     "Compiled {} files into {} packages",
//!     outcome.stats.files_compiled,
//!     outcome.table.len()
//! );
//! # Ok::<(), proto_pkg_build::error::Error>(())
//! ```

pub mod compile;
pub mod copy;
pub mod discover;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod resolve;
pub mod rewrite;
pub mod syntax;
