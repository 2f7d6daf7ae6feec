//! The two lines of `.proto` syntax this tool understands.
//!
//! | Form | Example |
//! |------|---------|
//! | Package declaration | `option go_package = "billing";` |
//! | Import statement | `import "invoice.proto";` |
//!
//! Both patterns are anchored at the start and end of the line: leading
//! indentation, trailing whitespace, single quotes or a missing semicolon all
//! mean the line is not recognized. Nothing else in the grammar is parsed.

const PACKAGE_PREFIX: &str = "option go_package = \"";
const IMPORT_PREFIX: &str = "import \"";
const STATEMENT_SUFFIX: &str = "\";";

/// Extension of schema files, used both for discovery and import matching.
pub const PROTO_EXTENSION: &str = ".proto";

/// A recognized import line, located by its index in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLine<'a> {
    /// Zero-based line index within the file.
    pub index: usize,
    /// The imported file name, extension included (e.g. `"invoice.proto"`).
    pub name: &'a str,
}

/// Extract the value of a `go_package` declaration line.
///
/// - `option go_package = "billing";` → `Some("billing")`
/// - `option go_package = "github.com/acme/billing";` → `Some("github.com/acme/billing")`
/// - `  option go_package = "billing";` → `None` (not anchored)
pub fn parse_package_decl(line: &str) -> Option<&str> {
    line.strip_prefix(PACKAGE_PREFIX)?
        .strip_suffix(STATEMENT_SUFFIX)
}

/// Build a `go_package` declaration line for `package`.
pub fn package_decl(package: &str) -> String {
    format!("{PACKAGE_PREFIX}{package}{STATEMENT_SUFFIX}")
}

/// Extract the imported file name from an import line.
///
/// Only imports of `.proto` files are recognized, and the returned name keeps
/// the extension: `import "invoice.proto";` → `Some("invoice.proto")`.
pub fn parse_import(line: &str) -> Option<&str> {
    let name = line
        .strip_prefix(IMPORT_PREFIX)?
        .strip_suffix(STATEMENT_SUFFIX)?;
    name.ends_with(PROTO_EXTENSION).then_some(name)
}

/// Build an import line for `name` placed under `package`.
///
/// An empty `package` yields an empty leading segment: `import "/name";`.
pub fn import_stmt(package: &str, name: &str) -> String {
    format!("{IMPORT_PREFIX}{package}/{name}{STATEMENT_SUFFIX}")
}

/// Find the package declared by the first declaration line in `contents`.
///
/// Scanning stops at the first recognized declaration. A declaration with an
/// empty value counts as no declaration at all.
pub fn find_package(contents: &str) -> Option<&str> {
    lines(contents)
        .find_map(parse_package_decl)
        .filter(|package| !package.is_empty())
}

/// Find the first import line in `contents`.
pub fn find_import(contents: &str) -> Option<ImportLine<'_>> {
    lines(contents)
        .enumerate()
        .find_map(|(index, line)| parse_import(line).map(|name| ImportLine { index, name }))
}

/// Iterate over the lines of `contents` without their terminators.
///
/// Both `\n` and `\r\n` endings are stripped, so a Windows-edited file matches
/// the same patterns as a Unix one.
pub fn lines(contents: &str) -> impl Iterator<Item = &str> {
    contents.split_inclusive('\n').map(strip_terminator)
}

/// Split a line (as produced by `split_inclusive('\n')`) into its body and
/// terminator.
pub fn split_terminator(line: &str) -> (&str, &str) {
    let body = strip_terminator(line);
    (body, &line[body.len()..])
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
