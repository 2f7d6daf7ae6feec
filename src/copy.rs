//! Optional copy of the rewritten sources into their package directories.

use std::path::Path;

use crate::discover::SchemaFile;
use crate::error::{Error, Result};
use crate::pipeline::BuildStats;
use crate::resolve::{self, ResolutionTable};

/// Copy each packaged file to `<target-root>/<package>/<name>`.
///
/// Files without a package stay where they are.
pub fn copy_sources(
    files: &[SchemaFile],
    table: &ResolutionTable,
    target_root: &Path,
    stats: &mut BuildStats,
) -> Result<()> {
    for file in files {
        let Some(package) = table.get(&file.name) else {
            continue;
        };

        let dest = resolve::package_dir(target_root, package).join(&file.name);
        std::fs::copy(&file.path, &dest).map_err(|e| Error::Copy {
            from: file.path.clone(),
            to: dest.clone(),
            source: e,
        })?;
        tracing::debug!(from = %file.path.display(), to = %dest.display(), "copied source");
        stats.files_copied += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_only_packaged_files() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(out.path().join("billing")).unwrap();

        let mut files = Vec::new();
        for (name, contents) in [
            ("invoice.proto", "option go_package = \"billing\";\n"),
            ("loose.proto", "syntax = \"proto3\";\n"),
        ] {
            let path = src.path().join(name);
            std::fs::write(&path, contents).unwrap();
            files.push(SchemaFile {
                path,
                name: name.to_string(),
            });
        }
        let table: ResolutionTable = [("invoice.proto", "billing")].into_iter().collect();

        let mut stats = BuildStats::default();
        copy_sources(&files, &table, out.path(), &mut stats).unwrap();

        assert_eq!(
            std::fs::read_to_string(out.path().join("billing/invoice.proto")).unwrap(),
            "option go_package = \"billing\";\n"
        );
        assert!(!out.path().join("loose.proto").exists());
        assert_eq!(stats.files_copied, 1);
    }

    #[test]
    fn missing_package_dir_is_a_copy_error() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let path = src.path().join("invoice.proto");
        std::fs::write(&path, "").unwrap();
        let files = vec![SchemaFile {
            path,
            name: "invoice.proto".to_string(),
        }];
        let table: ResolutionTable = [("invoice.proto", "billing")].into_iter().collect();

        let err = copy_sources(&files, &table, out.path(), &mut BuildStats::default())
            .unwrap_err();
        assert!(matches!(err, Error::Copy { .. }), "got {err:?}");
    }
}
