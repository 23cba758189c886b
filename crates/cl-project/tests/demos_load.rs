use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    crate_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

#[test]
fn demo_projects_validate() {
    let root = workspace_root();
    let demos = [
        "demos/projects/01_pipe_exchanger.yaml",
        "demos/projects/02_tank_loop.yaml",
        "demos/projects/03_substation_loop.yaml",
    ];

    for rel in demos {
        let path = root.join(rel);
        let result = cl_project::load_project(&path);
        assert!(
            result.is_ok(),
            "demo failed validation: {} => {:?}",
            path.display(),
            result.err()
        );
    }
}
