//! Semantic classification of raw descriptors.

use splice_types::math::is_unit_component;
use splice_types::{Category, Position, Rail, RailSet, RawDescriptor, SemanticPoint, Side};

use crate::config::ProcessConfig;

/// Classifies a descriptor against the located rails.
///
/// - category: web if `|Ydir| = 1`, flange if `|Zdir| = 1`, otherwise none
/// - position: front if `X > 0`
/// - rail: first rail (in index order) whose coordinate is strictly within
///   the match window of `Y`
/// - side: flange holes only, left if `Y` is above the matched rail
/// - depth: corrected for the known CAD artifact
#[must_use]
pub fn classify(descriptor: &RawDescriptor, rails: &RailSet, config: &ProcessConfig) -> SemanticPoint {
    let category = category_of(descriptor, config);
    let y = descriptor.position.y;
    let rail = match_rail(y, rails, config.rail_match_window());
    let side = match (category, rail) {
        (Some(Category::Flange), Some(rail)) => Some(Side::from_y(y, rail.y)),
        _ => None,
    };

    SemanticPoint {
        name: descriptor.name.clone(),
        category,
        diameter: descriptor.diameter,
        rail: rail.map(|rail| rail.index),
        position: Position::from_x(descriptor.position.x),
        side,
        depth: config.corrected_depth(descriptor.depth),
        location: descriptor.position,
        direction: descriptor.direction,
    }
}

/// Classifies every descriptor, preserving input order.
#[must_use]
pub fn classify_all(
    descriptors: &[RawDescriptor],
    rails: &RailSet,
    config: &ProcessConfig,
) -> Vec<SemanticPoint> {
    descriptors
        .iter()
        .map(|descriptor| classify(descriptor, rails, config))
        .collect()
}

fn category_of(descriptor: &RawDescriptor, config: &ProcessConfig) -> Option<Category> {
    let tolerance = config.axis_tolerance();
    if is_unit_component(descriptor.direction.y, tolerance) {
        Some(Category::Web)
    } else if is_unit_component(descriptor.direction.z, tolerance) {
        Some(Category::Flange)
    } else {
        None
    }
}

fn match_rail(y: f64, rails: &RailSet, window: f64) -> Option<&Rail> {
    rails.iter().find(|rail| (y - rail.y).abs() < window)
}
