//! cl-project: project file format, validation and legacy text-format import.
//!
//! Projects are stored as YAML (the default) or JSON, picked by file extension.
//! Every load and save goes through [`validate_project`].

pub mod legacy;
pub mod schema;
pub mod validate;

pub use legacy::load_legacy_dir;
pub use schema::*;
pub use validate::{ValidationError, validate_project};

use cl_core::FailureKind;
use std::path::{Path, PathBuf};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Legacy format error in {file}: {what}")]
    Legacy { file: String, what: String },

    #[error("Cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProjectError {
    /// Every project problem is detected before stepping.
    pub fn kind(&self) -> FailureKind {
        FailureKind::Configuration
    }
}

/// On-disk encoding of a project file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectFormat {
    Yaml,
    Json,
}

impl ProjectFormat {
    /// `.json` is JSON, anything else YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    fn parse(self, content: &str) -> ProjectResult<Project> {
        Ok(match self {
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
        })
    }

    fn render(self, project: &Project) -> ProjectResult<String> {
        Ok(match self {
            Self::Yaml => serde_yaml::to_string(project)?,
            Self::Json => serde_json::to_string_pretty(project)?,
        })
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ProjectError + '_ {
    move |source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub fn load_as(path: &Path, format: ProjectFormat) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path).map_err(io_error(path))?;
    let project = format.parse(&content)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_as(path: &Path, project: &Project, format: ProjectFormat) -> ProjectResult<()> {
    validate_project(project)?;
    let content = format.render(project)?;
    std::fs::write(path, content).map_err(io_error(path))
}

pub fn load_project(path: &Path) -> ProjectResult<Project> {
    load_as(path, ProjectFormat::from_path(path))
}

pub fn save_project(path: &Path, project: &Project) -> ProjectResult<()> {
    save_as(path, project, ProjectFormat::from_path(path))
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    load_as(path, ProjectFormat::Yaml)
}

pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    save_as(path, project, ProjectFormat::Yaml)
}

pub fn load_json(path: &Path) -> ProjectResult<Project> {
    load_as(path, ProjectFormat::Json)
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    save_as(path, project, ProjectFormat::Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(ProjectFormat::from_path(Path::new("a.json")), ProjectFormat::Json);
        assert_eq!(ProjectFormat::from_path(Path::new("a.JSON")), ProjectFormat::Json);
        assert_eq!(ProjectFormat::from_path(Path::new("a.yaml")), ProjectFormat::Yaml);
        assert_eq!(ProjectFormat::from_path(Path::new("a")), ProjectFormat::Yaml);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_project(Path::new("/nonexistent/co2loop.yaml")).unwrap_err();
        assert!(matches!(err, ProjectError::Io { .. }));
        assert!(err.to_string().contains("co2loop.yaml"));
    }
}
