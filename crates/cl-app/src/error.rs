//! Error types for the cl-app service layer.

use cl_core::FailureKind;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(#[from] cl_project::ProjectError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] cl_fluids::FluidError),

    #[error("Element error: {0}")]
    Component(#[from] cl_components::ComponentError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] cl_sim::SimError),

    #[error("Results error: {0}")]
    Results(#[from] cl_results::ResultsError),

    #[error("Compilation failed: {0}")]
    Compile(String),

    #[error("Failed to write {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AppError::Fluid(e) => e.kind(),
            AppError::Component(e) => e.kind(),
            AppError::Simulation(e) => e.kind(),
            AppError::Project(_)
            | AppError::Results(_)
            | AppError::Compile(_)
            | AppError::FileWrite { .. }
            | AppError::InvalidInput(_) => FailureKind::Configuration,
        }
    }
}
