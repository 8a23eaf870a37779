//! End-to-end construction of a drilling process from raw descriptors.

use splice_types::{Process, RailSet, RawDescriptor};
use tracing::{debug, info, warn};

use crate::classify::classify_all;
use crate::config::ProcessConfig;
use crate::context::RunContext;
use crate::error::Result;
use crate::pose::resolve_pose;
use crate::rails::locate_rails;
use crate::routing::{DropReason, RouteOutcome, RoutingReport, RoutingTable};
use crate::sort::sort_by_distance;
use crate::template::ProcessTemplate;

/// The outcome of one process build.
#[derive(Debug, Clone)]
pub struct ProcessBuild {
    /// The populated process tree.
    pub process: Process,
    /// Rails located for the run.
    pub rails: RailSet,
    /// Per-reason routing counts.
    pub report: RoutingReport,
}

/// Builds a process using the standard template.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the number of
/// located rails differs from the configured count.
pub fn build_process(descriptors: &[RawDescriptor], config: &ProcessConfig) -> Result<ProcessBuild> {
    build_process_with(descriptors, config, &ProcessTemplate::standard())
}

/// Builds a process against an explicit template.
///
/// Locates rails, classifies each descriptor, routes it into its station,
/// resolves its pose and finally orders every station far-to-near. Points
/// that match no station are counted in the report and left out.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the number of
/// located rails differs from the configured count.
pub fn build_process_with(
    descriptors: &[RawDescriptor],
    config: &ProcessConfig,
    template: &ProcessTemplate,
) -> Result<ProcessBuild> {
    config.validate()?;

    let rails = locate_rails(descriptors, config)?;
    let ctx = RunContext::new(config, rails)?;
    let points = classify_all(descriptors, ctx.rails(), config);

    let table = RoutingTable::from_template(template);
    let mut process = template.instantiate();
    let mut report = RoutingReport::default();

    for point in &points {
        let outcome = match table.route(point, config) {
            RouteOutcome::Station(target) => match resolve_pose(point, &ctx) {
                Some(phase) => {
                    process.steps[target.step].stations[target.station]
                        .phases
                        .push(phase);
                    RouteOutcome::Station(target)
                }
                None => RouteOutcome::Dropped(DropReason::Unclassified),
            },
            dropped => dropped,
        };
        if let RouteOutcome::Dropped(reason) = outcome {
            debug!(fastener = %point.name, %reason, "Dropped point");
        }
        report.record(outcome);
    }

    for step in &mut process.steps {
        for station in &mut step.stations {
            sort_by_distance(&mut station.phases);
        }
    }

    if report.dropped() > 0 {
        warn!(
            dropped = report.dropped(),
            unclassified = report.unclassified,
            unassigned_rail = report.unassigned_rail,
            inaccessible = report.inaccessible,
            no_matching_station = report.no_matching_station,
            "Some points were left out of the process"
        );
    }
    info!(
        steps = process.steps.len(),
        phases = process.phase_count(),
        routed = report.routed,
        "Built drilling process"
    );

    Ok(ProcessBuild {
        process,
        rails: ctx.into_rails(),
        report,
    })
}
