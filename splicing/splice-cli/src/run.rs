//! One conversion run, executed on a dedicated worker thread.

use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result, anyhow};
use splice_io::{
    CadSession, ExportFileProvider, TrajectoryLibrary, connect, query_families, save_process,
    write_family_dump,
};
use splice_process::{ProcessBuild, ProcessConfig, build_process};
use tracing::info;

/// Name of the worker thread running the conversion.
const WORKER_NAME: &str = "splice-build";

/// Inputs of one `build` run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub families: Vec<String>,
    pub dump_dir: Option<PathBuf>,
    pub trajectories: Option<PathBuf>,
    pub rail_merge_tolerance: Option<f64>,
    pub outer_clearance: Option<f64>,
    pub inner_clearance: Option<f64>,
}

impl BuildOptions {
    /// The process configuration with command-line overrides applied.
    fn config(&self) -> ProcessConfig {
        let defaults = ProcessConfig::default();
        let outer = self.outer_clearance.unwrap_or(defaults.flange_clearance(false));
        let inner = self.inner_clearance.unwrap_or(defaults.flange_clearance(true));
        let config = defaults.with_flange_clearances(outer, inner);
        match self.rail_merge_tolerance {
            Some(tolerance) => config.with_rail_merge_tolerance(tolerance),
            None => config,
        }
    }
}

/// Runs a build on the worker thread and waits for it.
pub fn spawn_build(options: BuildOptions) -> Result<()> {
    let worker = thread::Builder::new()
        .name(WORKER_NAME.to_string())
        .spawn(move || build(&options))
        .context("failed to start worker thread")?;
    let build = worker
        .join()
        .map_err(|_| anyhow!("worker thread panicked"))??;

    println!("{} drilling points written ({})", build.process.phase_count(), build.report);
    Ok(())
}

/// Runs the full conversion.
pub fn build(options: &BuildOptions) -> Result<ProcessBuild> {
    let config = options.config();
    config.validate().context("invalid process configuration")?;
    let library = load_library(options.trajectories.as_deref())?;

    let provider = ExportFileProvider::new(&options.input);
    let mut session = connect(&provider)
        .with_context(|| format!("failed to open {}", options.input.display()))?;
    let queries = query_families(&mut session, &options.families)?;
    session.close()?;

    if let Some(dir) = &options.dump_dir {
        for query in &queries {
            write_family_dump(dir, &query.family, &query.descriptors)
                .with_context(|| format!("failed to write listing for {}", query.family))?;
        }
    }

    let descriptors: Vec<_> = queries
        .into_iter()
        .flat_map(|query| query.descriptors)
        .collect();
    info!(descriptors = descriptors.len(), "Collected fastener descriptors");

    let build = build_process(&descriptors, &config).context("failed to build process")?;
    save_process(&options.output, &build.process, &library, &config)
        .with_context(|| format!("failed to write {}", options.output.display()))?;
    Ok(build)
}

/// Validates trajectory data and prints one line per path.
pub fn trajectories(path: Option<&Path>) -> Result<()> {
    let library = load_library(path)?;
    for trajectory in library.iter() {
        println!("{:<24}{} poses", trajectory.kind.key(), trajectory.len());
    }
    Ok(())
}

fn load_library(path: Option<&Path>) -> Result<TrajectoryLibrary> {
    match path {
        Some(path) => TrajectoryLibrary::load(path)
            .with_context(|| format!("failed to load trajectories from {}", path.display())),
        None => TrajectoryLibrary::standard().context("bundled trajectory data is invalid"),
    }
}
