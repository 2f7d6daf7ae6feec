//! Package resolution: which `go_package` each schema file belongs to.
//!
//! The resolver reads every discovered file once, creates an output
//! directory for each declared package and records the file's base name in a
//! [`ResolutionTable`]. The table is complete before any file is rewritten or
//! compiled, and nothing modifies it afterwards.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::discover::SchemaFile;
use crate::error::{Error, Result};
use crate::pipeline::{BuildStats, BuildWarning};
use crate::syntax;

/// Mapping from schema file base name (e.g. `"invoice.proto"`) to the
/// package it declares.
///
/// Every key has had `<target-root>/<package>` created for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolutionTable {
    packages: BTreeMap<String, String>,
}

impl ResolutionTable {
    /// Package declared by the file named `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.packages.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Record `name → package`, returning the package it replaced.
    fn insert(&mut self, name: String, package: String) -> Option<String> {
        self.packages.insert(name, package)
    }
}

impl<N: Into<String>, P: Into<String>> FromIterator<(N, P)> for ResolutionTable {
    fn from_iter<I: IntoIterator<Item = (N, P)>>(iter: I) -> Self {
        Self {
            packages: iter
                .into_iter()
                .map(|(name, package)| (name.into(), package.into()))
                .collect(),
        }
    }
}

/// Build the resolution table for `files`, creating one directory per
/// declared package under `target_root`.
///
/// Files without a declaration are skipped: they get neither a directory nor
/// a table entry. When two files share a base name, the later one wins and a
/// [`BuildWarning::PackageConflict`] is recorded if the packages differ.
pub fn resolve_packages(
    files: &[SchemaFile],
    target_root: &Path,
    stats: &mut BuildStats,
) -> Result<ResolutionTable> {
    let mut table = ResolutionTable::default();

    for file in files {
        let contents = read_schema(&file.path)?;

        let Some(package) = syntax::find_package(&contents) else {
            tracing::debug!(file = %file.path.display(), "no go_package declaration");
            stats.files_without_package += 1;
            continue;
        };

        let package_dir = package_dir(target_root, package);
        std::fs::create_dir_all(&package_dir).map_err(|e| Error::CreateDir {
            path: package_dir.clone(),
            source: e,
        })?;
        tracing::debug!(
            file = %file.path.display(),
            package,
            dir = %package_dir.display(),
            "resolved package"
        );

        match table.insert(file.name.clone(), package.to_string()) {
            Some(previous) if previous != package => {
                stats.warn(BuildWarning::PackageConflict {
                    name: file.name.clone(),
                    previous,
                    current: package.to_string(),
                });
            }
            _ => {}
        }
    }

    stats.packages_resolved = table.len();
    Ok(table)
}

/// Directory for `package` under `target_root`.
///
/// Only the plain name components of `package` are kept, so a root, drive
/// prefix, `.` or `..` in the declared value can never place the directory
/// outside `target_root`: `"/abs/billing"` maps to `<target-root>/abs/billing`
/// and `"../billing"` to `<target-root>/billing`.
pub fn package_dir(target_root: &Path, package: &str) -> PathBuf {
    let mut dir = target_root.to_path_buf();
    for component in Path::new(package).components() {
        if let Component::Normal(part) = component {
            dir.push(part);
        }
    }
    dir
}

/// Read a schema file as UTF-8 text.
pub fn read_schema(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })
}
