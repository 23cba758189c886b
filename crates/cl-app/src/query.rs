//! Query helpers for stored traces.

use crate::error::{AppError, AppResult};
use cl_results::{SeriesVariable, TraceRecord, extract_series};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub record_count: usize,
    /// First and last step present in the trace
    pub step_range: (usize, usize),
    pub element_ids: Vec<String>,
}

pub fn get_run_summary(records: &[TraceRecord]) -> AppResult<RunSummary> {
    let (first, last) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first.step, last.step),
        _ => return Err(AppError::InvalidInput("No records in run".to_string())),
    };
    Ok(RunSummary {
        record_count: records.len(),
        step_range: (first, last),
        element_ids: list_element_ids(records),
    })
}

/// Element ids in loop order, as they appear in the first recorded step.
pub fn list_element_ids(records: &[TraceRecord]) -> Vec<String> {
    let Some(first) = records.first() else {
        return Vec::new();
    };
    records
        .iter()
        .take_while(|r| r.step == first.step)
        .map(|r| r.element_id.clone())
        .collect()
}

pub fn extract_element_series(
    records: &[TraceRecord],
    element_id: &str,
    variable: &str,
) -> AppResult<Vec<(usize, f64)>> {
    let variable: SeriesVariable = variable.parse()?;
    if !records.iter().any(|r| r.element_id == element_id) {
        return Err(AppError::InvalidInput(format!(
            "Unknown element in run: {}",
            element_id
        )));
    }
    Ok(extract_series(records, element_id, variable))
}

/// Two-column CSV: `step,<variable> [<unit>]`.
pub fn series_to_csv(variable: SeriesVariable, series: &[(usize, f64)]) -> String {
    let mut out = format!("step,{} [{}]\n", variable.key(), variable.unit());
    for (step, value) in series {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{},{}", step, value);
    }
    out
}
