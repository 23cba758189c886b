//! Application service layer for co2loop.
//!
//! Shared by the command-line front end: project loading and checks, compilation
//! of a project into a runnable network, run execution with persistence, and
//! series queries over stored traces.

pub mod compile;
pub mod error;
pub mod project_service;
pub mod query;
pub mod run_service;

pub use compile::{CompiledRun, build_fluid_model, compile_project};
pub use error::{AppError, AppResult};
pub use project_service::{check_project, import_legacy, load_project};
pub use query::{
    RunSummary, extract_element_series, get_run_summary, list_element_ids, series_to_csv,
};
pub use run_service::{RunOptions, RunRequest, RunResponse, ensure_run, list_runs, load_run};
