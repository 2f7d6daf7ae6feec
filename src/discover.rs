//! Recursive discovery of schema files under a source directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// A schema file found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFile {
    /// Path as found by the walk (rooted at the directory that was walked).
    pub path: PathBuf,
    /// File name without directories, used as the resolution table key.
    pub name: String,
}

/// List every file under `root` whose name ends with `extension`.
///
/// Entries are visited depth-first with each directory's children sorted by
/// file name, so the order is stable across runs. An empty result is reported
/// as [`Error::NoFilesFound`] rather than an empty list.
pub fn find_schema_files(root: &Path, extension: &str) -> Result<Vec<SchemaFile>> {
    if !root.exists() {
        return Err(Error::SourceDirMissing(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Discovery {
            root: root.to_path_buf(),
            extension: extension.to_string(),
            source: e,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(extension) {
            continue;
        }

        files.push(SchemaFile {
            path: entry.into_path(),
            name,
        });
    }

    if files.is_empty() {
        return Err(Error::NoFilesFound {
            root: root.to_path_buf(),
            extension: extension.to_string(),
        });
    }

    tracing::debug!(count = files.len(), root = %root.display(), "discovered schema files");
    Ok(files)
}
