//! Import rewriting.
//!
//! Each schema file's first import is rewritten to point into the package
//! directory of the file it imports: with `invoice.proto` resolved to
//! `billing`, the line `import "invoice.proto";` becomes
//! `import "billing/invoice.proto";`.
//!
//! Only the matched line is touched. The file is rebuilt line by line and
//! every other line, including identical copies of the import, is kept as is
//! along with its original line terminator.

use std::path::Path;

use crate::discover::SchemaFile;
use crate::error::{Error, Result};
use crate::pipeline::{BuildStats, BuildWarning};
use crate::resolve::{ResolutionTable, read_schema};
use crate::syntax;

/// How an imported file name resolves against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportResolution<'a> {
    /// The imported file declares this package.
    Resolved(&'a str),
    /// The import already reads `<package>/<name>` for the package `name`
    /// resolves to, e.g. from an earlier run.
    AlreadyQualified,
    /// No file with this name declared a package.
    Unresolved,
}

/// Resolve an imported file name (extension included) against `table`.
pub fn resolve_import<'a>(name: &str, table: &'a ResolutionTable) -> ImportResolution<'a> {
    if let Some(package) = table.get(name) {
        return ImportResolution::Resolved(package);
    }
    if let Some((prefix, base)) = name.rsplit_once('/') {
        if table.get(base) == Some(prefix) {
            return ImportResolution::AlreadyQualified;
        }
    }
    ImportResolution::Unresolved
}

/// Rewrite the first import of every file in `files`, in order.
///
/// Files without an import are not written at all. An import whose target
/// has no package is rewritten with an empty package segment and reported as
/// a [`BuildWarning::UnresolvedImport`], unless `strict` is set, in which case
/// it aborts the run before that file is written.
pub fn rewrite_imports(
    files: &[SchemaFile],
    table: &ResolutionTable,
    strict: bool,
    stats: &mut BuildStats,
) -> Result<()> {
    for file in files {
        let contents = read_schema(&file.path)?;

        let Some(import) = syntax::find_import(&contents) else {
            continue;
        };
        tracing::debug!(file = %file.path.display(), import = import.name, "found import");

        let package = match resolve_import(import.name, table) {
            ImportResolution::Resolved(package) => package,
            ImportResolution::AlreadyQualified => {
                stats.imports_already_qualified += 1;
                continue;
            }
            ImportResolution::Unresolved => {
                if strict {
                    return Err(Error::UnresolvedImport {
                        file: file.path.clone(),
                        import: import.name.to_string(),
                    });
                }
                stats.warn(BuildWarning::UnresolvedImport {
                    file: file.path.clone(),
                    import: import.name.to_string(),
                });
                ""
            }
        };

        let replacement = syntax::import_stmt(package, import.name);
        let rewritten = replace_line(&contents, import.index, &replacement);
        write_schema(&file.path, &rewritten)?;
        stats.imports_rewritten += 1;
    }

    Ok(())
}

/// Replace the body of line `index` in `contents` with `replacement`,
/// keeping that line's terminator and every other line unchanged.
pub fn replace_line(contents: &str, index: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(contents.len() + replacement.len());
    for (i, line) in contents.split_inclusive('\n').enumerate() {
        if i == index {
            let (_, terminator) = syntax::split_terminator(line);
            out.push_str(replacement);
            out.push_str(terminator);
        } else {
            out.push_str(line);
        }
    }
    out
}

fn write_schema(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| Error::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
