//! Result data types.

use cl_core::FailureKind;
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub project_name: String,
    /// RFC 3339, UTC
    pub timestamp: String,
    pub steps_requested: usize,
    pub completed_steps: usize,
    pub status: RunStatus,
    pub backend: String,
    pub solver_version: String,
    /// Failed steps, in order; a halted run has exactly one
    #[serde(default)]
    pub failures: Vec<FailureRecord>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Completed,
    Halted,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FlowRecord {
    pub mass_flow_kg_s: f64,
    pub pressure_pa: f64,
    pub temperature_k: f64,
    pub quality: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TankRecord {
    pub mass_kg: f64,
    pub internal_energy_j: f64,
    pub temperature_k: f64,
    pub pressure_pa: f64,
    pub quality: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FailureRecord {
    pub step: usize,
    pub element_id: String,
    pub element_name: String,
    pub kind: FailureKind,
    pub inlet: FlowRecord,
    pub message: String,
}

/// One element update, one line of `trace.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraceRecord {
    pub step: usize,
    pub element_id: String,
    pub element_kind: String,
    pub inlet: FlowRecord,
    pub outlet: FlowRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tank: Option<TankRecord>,
}
