//! cl-results: run manifests and per-element trace storage.

pub mod hash;
pub mod series;
pub mod store;
pub mod types;

pub use hash::{compute_run_id, timestamp_now};
pub use series::{SeriesVariable, extract_series};
pub use store::RunStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Run {run_id}: malformed trace line {line}: {source}")]
    TraceLine {
        run_id: String,
        line: usize,
        source: serde_json::Error,
    },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },

    #[error("Unknown series variable: {name}")]
    UnknownVariable { name: String },
}
