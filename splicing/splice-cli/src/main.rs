//! Rail splicing process builder.
//!
//! Converts the fastener holes of a rail splicing assembly into the drilling
//! process document read by the robot cell.
//!
//! # Commands
//!
//! - `splice build <EXPORT>` - Build `BuildProcess.xml` from a parameter export
//! - `splice trajectories [FILE]` - Validate and summarize trajectory data

mod run;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use run::BuildOptions;

/// Rail splicing process builder
#[derive(Parser)]
#[command(name = "splice")]
#[command(about = "Build robot drilling processes for rail splicing assemblies", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a drilling process from a fastener parameter export
    Build {
        /// Parameter export to read (one `name;p1;...;p10` record per line)
        #[arg(name = "EXPORT")]
        input: PathBuf,

        /// Process document to write
        #[arg(short, long, default_value = splice_io::DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Fastener family name prefixes to query, in order
        #[arg(long = "family", default_values = ["asna", "en6115"])]
        families: Vec<String>,

        /// Write one point listing per family into this directory
        #[arg(long)]
        dump_dir: Option<PathBuf>,

        /// Trajectory data file replacing the bundled calibration
        #[arg(long)]
        trajectories: Option<PathBuf>,

        /// Distance under which two rail candidates are one rail (mm)
        #[arg(long)]
        rail_merge_tolerance: Option<f64>,

        /// Flange clearance on rails 1, 2, 5 and 6 (mm)
        #[arg(long)]
        outer_clearance: Option<f64>,

        /// Flange clearance on rails 3 and 4 (mm)
        #[arg(long)]
        inner_clearance: Option<f64>,
    },

    /// Validate trajectory data and print a summary
    Trajectories {
        /// Trajectory data file; the bundled calibration if omitted
        #[arg(name = "FILE")]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            input,
            output,
            families,
            dump_dir,
            trajectories,
            rail_merge_tolerance,
            outer_clearance,
            inner_clearance,
        } => run::spawn_build(BuildOptions {
            input,
            output,
            families,
            dump_dir,
            trajectories,
            rail_merge_tolerance,
            outer_clearance,
            inner_clearance,
        }),
        Commands::Trajectories { path } => run::trajectories(path.as_deref()),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}
