use clap::{Parser, Subcommand};
use cl_app::{AppError, AppResult, RunOptions, RunRequest, project_service, query, run_service};
use cl_results::{FailureRecord, FlowRecord, RunManifest, SeriesVariable};
use cl_sim::FailurePolicy;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "co2loop")]
#[command(about = "co2loop - CO2 refrigeration loop simulator", long_about = None)]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a project and build its network without running it
    Validate {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Run a simulation
    Run {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Number of steps (overrides the project)
        #[arg(long)]
        steps: Option<usize>,
        /// Skip failed steps instead of halting
        #[arg(long)]
        skip_failed: bool,
        /// Do not store the run
        #[arg(long)]
        no_save: bool,
        /// Reuse a stored run of identical content
        #[arg(long)]
        cached: bool,
        /// Print every element output of every step
        #[arg(long)]
        print_steps: bool,
    },
    /// Convert a legacy text directory (main.txt + parameter files) into a project
    ImportLegacy {
        /// Directory holding main.txt
        dir: PathBuf,
        /// Output project YAML file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List stored runs for a project
    Runs {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Show details of a stored run
    ShowRun {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export one element variable of a run as CSV
    ExportSeries {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Element ID
        element_id: String,
        /// mass_flow, pressure, temperature, quality or tank_mass
        variable: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "co2loop starting");

    match dispatch(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error [{}]: {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(command: Commands) -> AppResult<ExitCode> {
    match command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Run {
            project_path,
            steps,
            skip_failed,
            no_save,
            cached,
            print_steps,
        } => {
            let options = RunOptions {
                steps,
                on_failure: skip_failed.then_some(FailurePolicy::SkipStep),
                save: !no_save,
                use_cache: cached,
                ..RunOptions::default()
            };
            cmd_run(&project_path, options, print_steps)
        }
        Commands::ImportLegacy { dir, output } => cmd_import_legacy(&dir, &output),
        Commands::Runs { project_path } => cmd_runs(&project_path),
        Commands::ShowRun {
            project_path,
            run_id,
        } => cmd_show_run(&project_path, &run_id),
        Commands::ExportSeries {
            project_path,
            run_id,
            element_id,
            variable,
            output,
        } => cmd_export_series(
            &project_path,
            &run_id,
            &element_id,
            &variable,
            output.as_deref(),
        ),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<ExitCode> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::check_project(project_path)?;
    println!(
        "✓ Project '{}' is valid ({} elements, {} schedules)",
        project.name,
        project.elements.len(),
        project.schedules.len()
    );
    Ok(ExitCode::SUCCESS)
}

fn format_flow(flow: &FlowRecord) -> String {
    format!(
        "({}, {}, {}, {})",
        flow.mass_flow_kg_s, flow.pressure_pa, flow.temperature_k, flow.quality
    )
}

fn print_failure(failure: &FailureRecord) {
    println!(
        "  step {}: element '{}' ({}) failed [{}]",
        failure.step, failure.element_id, failure.element_name, failure.kind
    );
    println!("    inlet (mdot, p, T, x): {}", format_flow(&failure.inlet));
    println!("    {}", failure.message);
}

fn print_manifest(manifest: &RunManifest) {
    println!("  Project:   {}", manifest.project_name);
    println!("  Timestamp: {}", manifest.timestamp);
    println!("  Backend:   {}", manifest.backend);
    println!(
        "  Steps:     {}/{} completed ({:?})",
        manifest.completed_steps, manifest.steps_requested, manifest.status
    );
}

fn cmd_run(project_path: &Path, options: RunOptions, print_steps: bool) -> AppResult<ExitCode> {
    println!("Running project: {}", project_path.display());
    let response = run_service::ensure_run(&RunRequest {
        project_path,
        options,
    })?;

    if print_steps {
        for record in &response.records {
            println!(
                "Step: {} Element: {} | Output result: {}",
                record.step + 1,
                record.element_id,
                format_flow(&record.outlet)
            );
        }
    }

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else if response.halted() {
        println!("✗ Simulation halted: {}", response.run_id);
    } else {
        println!("✓ Simulation completed: {}", response.run_id);
    }
    print_manifest(&response.manifest);
    if let Some(last) = response.records.last() {
        println!("  Final state (mdot, p, T, x): {}", format_flow(&last.outlet));
    }
    if !response.manifest.failures.is_empty() {
        println!("Failed steps:");
        for failure in &response.manifest.failures {
            print_failure(failure);
        }
    }
    if response.saved && !response.loaded_from_cache {
        println!("  Saved to project run store");
    }
    println!("  Elapsed: {:.3}s", response.elapsed_s);

    Ok(if response.halted() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}

fn cmd_import_legacy(dir: &Path, output: &Path) -> AppResult<ExitCode> {
    let project = project_service::import_legacy(dir, output)?;
    println!(
        "✓ Imported {} elements from {} into {}",
        project.elements.len(),
        dir.display(),
        output.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_runs(project_path: &Path) -> AppResult<ExitCode> {
    let runs = run_service::list_runs(project_path)?;
    if runs.is_empty() {
        println!("No stored runs for {}", project_path.display());
    } else {
        println!("Stored runs:");
        for manifest in runs {
            println!(
                "  {} ({}, {:?}, {}/{} steps)",
                manifest.run_id,
                manifest.timestamp,
                manifest.status,
                manifest.completed_steps,
                manifest.steps_requested
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_show_run(project_path: &Path, run_id: &str) -> AppResult<ExitCode> {
    println!("Loading run: {}", run_id);
    let (manifest, records) = run_service::load_run(project_path, run_id)?;

    println!("\nRun Summary:");
    print_manifest(&manifest);
    if let Ok(summary) = query::get_run_summary(&records) {
        println!("  Records:   {}", summary.record_count);
        println!(
            "  Step range: {} - {}",
            summary.step_range.0, summary.step_range.1
        );
        println!("\nElements:");
        for id in summary.element_ids {
            println!("  {}", id);
        }
    }
    if !manifest.failures.is_empty() {
        println!("\nFailed steps:");
        for failure in &manifest.failures {
            print_failure(failure);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_export_series(
    project_path: &Path,
    run_id: &str,
    element_id: &str,
    variable: &str,
    output: Option<&Path>,
) -> AppResult<ExitCode> {
    let (_manifest, records) = run_service::load_run(project_path, run_id)?;
    let series = query::extract_element_series(&records, element_id, variable)?;
    let variable: SeriesVariable = variable.parse()?;
    let csv = query::series_to_csv(variable, &series);

    if let Some(path) = output {
        std::fs::write(path, csv).map_err(|source| AppError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }
    Ok(ExitCode::SUCCESS)
}
