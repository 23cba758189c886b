//! Content-based hashing for run IDs.

use cl_project::schema::Project;
use sha2::{Digest, Sha256};

/// Identical project content and step count give the same id.
pub fn compute_run_id(project: &Project, steps: usize, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let project_json = serde_json::to_string(project).unwrap_or_default();
    hasher.update(project_json.as_bytes());
    hasher.update(steps.to_le_bytes());
    hasher.update(solver_version.as_bytes());

    format!("{:x}", hasher.finalize())
}

pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cl_project::schema::*;

    fn project(name: &str) -> Project {
        Project {
            version: SCHEMA_VERSION,
            name: name.to_string(),
            fluid: FluidDef::default(),
            inlet: InletDef {
                mass_flow_kg_s: 0.1,
                pressure_pa: 5e6,
                temperature_k: 280.0,
                quality: None,
            },
            simulation: SimulationDef::default(),
            elements: vec![ElementDef {
                id: "hx".to_string(),
                name: "hx".to_string(),
                kind: ElementKindDef::Exchanger { duty_w: 10.0 },
            }],
            schedules: vec![],
        }
    }

    #[test]
    fn hash_stability() {
        let p = project("a");
        assert_eq!(compute_run_id(&p, 50, "v1"), compute_run_id(&p, 50, "v1"));
        assert_eq!(compute_run_id(&p, 50, "v1").len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let a = project("a");
        let b = project("b");
        assert_ne!(compute_run_id(&a, 50, "v1"), compute_run_id(&b, 50, "v1"));
        assert_ne!(compute_run_id(&a, 50, "v1"), compute_run_id(&a, 51, "v1"));
        assert_ne!(compute_run_id(&a, 50, "v1"), compute_run_id(&a, 50, "v2"));
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let ts = timestamp_now();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
