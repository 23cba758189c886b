//! On-disk run store.
//!
//! Layout: `<root>/<run_id>/manifest.json` plus `<root>/<run_id>/trace.jsonl`, one
//! [`TraceRecord`] per line in step order.

use crate::types::{RunManifest, TraceRecord};
use crate::{ResultsError, ResultsResult};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const TRACE_FILE: &str = "trace.jsonl";

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        fs::create_dir_all(&root_dir)?;
        Ok(Self { root_dir })
    }

    /// Store under `<project dir>/.co2loop/runs`.
    pub fn for_project(project_path: &Path) -> ResultsResult<Self> {
        let project_dir = project_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: format!("{} has no parent directory", project_path.display()),
            })?;
        Self::new(project_dir.join(".co2loop").join("runs"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    fn existing(&self, run_id: &str, file: &str) -> ResultsResult<PathBuf> {
        let path = self.run_dir(run_id).join(file);
        if path.is_file() {
            Ok(path)
        } else {
            Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            })
        }
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join(MANIFEST_FILE).is_file()
    }

    /// Write the trace first and the manifest last, so a manifest on disk always has
    /// its complete trace beside it.
    pub fn save_run(&self, manifest: &RunManifest, records: &[TraceRecord]) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let mut trace = BufWriter::new(File::create(run_dir.join(TRACE_FILE))?);
        for record in records {
            serde_json::to_writer(&mut trace, record)?;
            trace.write_all(b"\n")?;
        }
        trace.flush()?;

        fs::write(
            run_dir.join(MANIFEST_FILE),
            serde_json::to_string_pretty(manifest)?,
        )?;
        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let content = fs::read_to_string(self.existing(run_id, MANIFEST_FILE)?)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_trace(&self, run_id: &str) -> ResultsResult<Vec<TraceRecord>> {
        let reader = BufReader::new(File::open(self.existing(run_id, TRACE_FILE)?)?);
        let mut records = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|source| ResultsError::TraceLine {
                run_id: run_id.to_string(),
                line: index + 1,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Readable manifests, most recent first; `project_name` keeps only that project's
    /// runs when several projects share a directory.
    pub fn list_runs(&self, project_name: Option<&str>) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let run_id = entry.file_name().to_string_lossy().into_owned();
            if let Ok(manifest) = self.load_manifest(&run_id)
                && project_name.is_none_or(|name| manifest.project_name == name)
            {
                runs.push(manifest);
            }
        }
        runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
