//! JSON build report.
//!
//! Written after a successful run when `--report` is given. The report lists
//! the discovered files, the resolution table and the stage counters and
//! warnings, so a CI job can check for unresolved imports without parsing
//! logs.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::pipeline::{BuildOutcome, BuildStats};
use crate::resolve::ResolutionTable;

#[derive(Debug, Serialize)]
pub struct BuildReport<'a> {
    pub source_dir: &'a Path,
    pub out_dir: &'a Path,
    pub files: Vec<&'a Path>,
    pub packages: &'a ResolutionTable,
    pub stats: &'a BuildStats,
}

impl<'a> BuildReport<'a> {
    pub fn new(outcome: &'a BuildOutcome, source_dir: &'a Path, out_dir: &'a Path) -> Self {
        Self {
            source_dir,
            out_dir,
            files: outcome.files.iter().map(|f| f.path.as_path()).collect(),
            packages: &outcome.table,
            stats: &outcome.stats,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Report(format!("serializing build report: {e}")))
    }
}

/// Write `report` as pretty JSON to `path`.
pub fn write_report(report: &BuildReport<'_>, path: &Path) -> Result<()> {
    let json = report.to_json()?;
    std::fs::write(path, json + "\n").map_err(|e| Error::Write {
        path: PathBuf::from(path),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::SchemaFile;
    use crate::pipeline::BuildWarning;

    #[test]
    fn report_serializes_table_and_warnings() {
        let mut stats = BuildStats {
            files_discovered: 2,
            packages_resolved: 1,
            ..Default::default()
        };
        stats.warnings.push(BuildWarning::UnpackagedFile {
            file: PathBuf::from("src/loose.proto"),
        });
        let outcome = BuildOutcome {
            files: vec![
                SchemaFile {
                    path: PathBuf::from("src/invoice.proto"),
                    name: "invoice.proto".to_string(),
                },
                SchemaFile {
                    path: PathBuf::from("src/loose.proto"),
                    name: "loose.proto".to_string(),
                },
            ],
            table: [("invoice.proto", "billing")].into_iter().collect(),
            stats,
        };

        let report = BuildReport::new(&outcome, Path::new("src"), Path::new("protobuf"));
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["out_dir"], "protobuf");
        assert_eq!(value["files"][1], "src/loose.proto");
        assert_eq!(value["packages"]["invoice.proto"], "billing");
        assert_eq!(value["stats"]["files_discovered"], 2);
        assert_eq!(value["stats"]["warnings"][0]["kind"], "unpackaged_file");
        assert_eq!(value["stats"]["warnings"][0]["file"], "src/loose.proto");
    }
}
