use cl_app::{RunOptions, RunRequest, check_project, ensure_run, list_runs, load_run, query};
use cl_core::FailureKind;
use cl_results::RunStatus;
use std::path::{Path, PathBuf};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos/projects")
        .join(name)
}

/// Copy a demo project into a scratch dir so runs are stored there.
fn scratch_copy(demo_name: &str, dir_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(dir_name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(demo_name);
    std::fs::copy(demo(demo_name), &path).unwrap();
    path
}

fn write_project(dir_name: &str, yaml: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(dir_name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("project.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

fn request(path: &Path, options: RunOptions) -> RunRequest<'_> {
    RunRequest {
        project_path: path,
        options,
    }
}

#[test]
fn surrogate_run_persists_in_project_store() {
    let path = scratch_copy("01_pipe_exchanger.yaml", "cl_app_persist");
    let response = ensure_run(&request(&path, RunOptions::default())).unwrap();

    assert!(!response.halted());
    assert!(response.saved);
    assert_eq!(response.manifest.completed_steps, 20);
    assert_eq!(response.records.len(), 40);

    let runs = list_runs(&path).unwrap();
    assert!(runs.iter().any(|r| r.run_id == response.run_id));

    let (manifest, records) = load_run(&path, &response.run_id).unwrap();
    assert_eq!(manifest.status, RunStatus::Completed);
    assert_eq!(records, response.records);

    let summary = query::get_run_summary(&records).unwrap();
    assert_eq!(summary.element_ids, vec!["p1".to_string(), "hx".to_string()]);
    assert_eq!(summary.step_range, (0, 19));

    let pressure = query::extract_element_series(&records, "p1", "pressure").unwrap();
    assert_eq!(pressure.len(), 20);
    assert!(pressure.windows(2).all(|w| w[1].1 < w[0].1));
}

#[test]
fn cached_run_is_reused_and_overrides_change_the_id() {
    let path = scratch_copy("01_pipe_exchanger.yaml", "cl_app_cache");
    let first = ensure_run(&request(&path, RunOptions::default())).unwrap();

    let cached = ensure_run(&request(
        &path,
        RunOptions {
            use_cache: true,
            ..RunOptions::default()
        },
    ))
    .unwrap();
    assert!(cached.loaded_from_cache);
    assert_eq!(cached.run_id, first.run_id);
    assert_eq!(cached.records, first.records);

    let shorter = ensure_run(&request(
        &path,
        RunOptions {
            steps: Some(3),
            save: false,
            ..RunOptions::default()
        },
    ))
    .unwrap();
    assert_ne!(shorter.run_id, first.run_id);
    assert_eq!(shorter.manifest.completed_steps, 3);
    assert!(!shorter.saved);
    assert_eq!(list_runs(&path).unwrap().len(), 1);
}

const TWO_PHASE_INLET: &str = r#"
version: 1
name: two-phase inlet
fluid:
  backend: surrogate
inlet:
  mass_flow_kg_s: 0.1
  pressure_pa: 5.0e6
  temperature_k: 280.0
  quality: 0.5
simulation:
  steps: 4
elements:
  - id: p1
    name: Pipe
    kind:
      type: Pipe
      length_m: 5.0
      diameter_m: 0.02
      roughness_m: 1.0e-5
"#;

#[test]
fn halted_run_is_saved_with_its_failure() {
    let path = write_project("cl_app_halt", TWO_PHASE_INLET);
    let response = ensure_run(&request(&path, RunOptions::default())).unwrap();

    assert!(response.halted());
    assert_eq!(response.manifest.completed_steps, 0);
    assert!(response.records.is_empty());
    let failure = &response.manifest.failures[0];
    assert_eq!(failure.step, 0);
    assert_eq!(failure.element_id, "p1");
    assert_eq!(failure.kind, FailureKind::UnhandledRegime);
    assert_eq!(failure.inlet.quality, 0.5);

    let (stored, _) = load_run(&path, &response.run_id).unwrap();
    assert_eq!(stored.failures, response.manifest.failures);
}

#[test]
fn skip_policy_records_every_failed_step() {
    let path = write_project("cl_app_skip", TWO_PHASE_INLET);
    let response = ensure_run(&request(
        &path,
        RunOptions {
            on_failure: Some(cl_sim::FailurePolicy::SkipStep),
            save: false,
            ..RunOptions::default()
        },
    ))
    .unwrap();
    assert_eq!(response.manifest.status, RunStatus::Completed);
    assert_eq!(response.manifest.failures.len(), 4);
}

#[test]
fn demo_projects_compile() {
    check_project(&demo("01_pipe_exchanger.yaml")).unwrap();
    check_project(&demo("03_substation_loop.yaml")).unwrap();
}
