//! Project loading, checks and legacy import.

use crate::compile::compile_project;
use crate::error::{AppError, AppResult};
use cl_project::schema::Project;
use std::path::Path;
use tracing::info;

pub fn load_project(path: &Path) -> AppResult<Project> {
    Ok(cl_project::load_project(path)?)
}

/// Schema validation plus a dry compilation: the fluid backend is built and every
/// element is charged, so wiring and property-range problems show up before a run.
pub fn check_project(path: &Path) -> AppResult<Project> {
    let project = load_project(path)?;
    let compiled = compile_project(&project)?;
    info!(
        project = %project.name,
        elements = compiled.network.len(),
        backend = compiled.fluid.name(),
        "project checked"
    );
    Ok(project)
}

/// Convert a legacy text directory and write it as a project at `output` (YAML unless
/// the extension is `.json`).
pub fn import_legacy(dir: &Path, output: &Path) -> AppResult<Project> {
    let project = cl_project::load_legacy_dir(dir)?;
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| AppError::FileWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    cl_project::save_project(output, &project)?;
    info!(elements = project.elements.len(), output = %output.display(), "legacy project imported");
    Ok(project)
}
