//! Per-region generation loop.
//!
//! For each candidate region, in order:
//! 1. Resolve its zones from the AZ map (skip the region if there are none)
//! 2. Place resources across the zones
//! 3. Build the topology graph and render it
//!
//! A failure in one region is recorded and the loop moves on. Regions are
//! rendered strictly one after another through the same renderer.

use std::path::PathBuf;

use tracing::{debug, error, info, warn};
use zonegrid_core::{AzMap, LayoutConfig, ResourceCounts};
use zonegrid_placement::{PlacementPlan, place};

use crate::error::TopologyError;
use crate::graph::build;
use crate::render::{LayoutOptions, Renderer, render};

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub layout: LayoutOptions,
    /// Only the first N zones of each region take part in placement.
    pub max_zones: Option<usize>,
}

impl From<&LayoutConfig> for GenerateOptions {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            layout: LayoutOptions::from(config),
            max_zones: config.max_zones,
        }
    }
}

#[derive(Debug)]
pub enum RegionOutcome {
    Rendered { path: PathBuf },
    /// The region has no known zones.
    Skipped,
    Failed { error: TopologyError },
}

#[derive(Debug)]
pub struct RegionReport {
    pub region: String,
    pub outcome: RegionOutcome,
}

/// Outcome of one run, one entry per candidate region in input order.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub regions: Vec<RegionReport>,
}

impl GenerationReport {
    pub fn rendered(&self) -> impl Iterator<Item = (&str, &PathBuf)> {
        self.regions.iter().filter_map(|r| match &r.outcome {
            RegionOutcome::Rendered { path } => Some((r.region.as_str(), path)),
            _ => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &TopologyError)> {
        self.regions.iter().filter_map(|r| match &r.outcome {
            RegionOutcome::Failed { error } => Some((r.region.as_str(), error)),
            _ => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().filter_map(|r| match r.outcome {
            RegionOutcome::Skipped => Some(r.region.as_str()),
            _ => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }
}

/// Zones used for `region`: duplicates collapsed to their first
/// occurrence, then truncated to `max_zones`. Empty if the region is unknown.
pub fn zones_for(az_map: &AzMap, region: &str, max_zones: Option<usize>) -> Vec<String> {
    let Some(listed) = az_map.zones(region) else {
        return Vec::new();
    };

    let mut zones: Vec<String> = Vec::with_capacity(listed.len());
    for zone in listed {
        if zones.contains(zone) {
            warn!(region, zone = %zone, "duplicate availability zone ignored");
            continue;
        }
        zones.push(zone.clone());
    }

    if let Some(max) = max_zones {
        zones.truncate(max);
    }
    zones
}

/// Place, build and render a single region.
pub fn generate_region<R: Renderer + ?Sized>(
    region: &str,
    counts: &ResourceCounts,
    zones: &[String],
    renderer: &mut R,
    options: &GenerateOptions,
) -> Result<PathBuf, TopologyError> {
    let plan = place(counts, zones)?;
    let graph = build(region, &plan);
    Ok(render(&graph, renderer, &options.layout)?)
}

/// Generate one diagram per candidate region.
///
/// Not safe to run concurrently against the same output location; the
/// caller must serialize whole runs.
pub fn generate<R: Renderer + ?Sized>(
    counts: &ResourceCounts,
    az_map: &AzMap,
    renderer: &mut R,
    options: &GenerateOptions,
) -> GenerationReport {
    let mut report = GenerationReport::default();

    for region in &counts.candidate_regions {
        let zones = zones_for(az_map, region, options.max_zones);
        let outcome = if zones.is_empty() {
            debug!(region = %region, "no availability zones known, skipping");
            RegionOutcome::Skipped
        } else {
            match generate_region(region, counts, &zones, renderer, options) {
                Ok(path) => {
                    info!(region = %region, path = %path.display(), "diagram generated");
                    RegionOutcome::Rendered { path }
                }
                Err(e) => {
                    error!(region = %region, error = %e, "diagram generation failed");
                    RegionOutcome::Failed { error: e }
                }
            }
        };
        report.regions.push(RegionReport {
            region: region.clone(),
            outcome,
        });
    }

    report
}

/// Placement plans for every candidate region that has zones, without
/// rendering anything.
pub fn plan_regions(
    counts: &ResourceCounts,
    az_map: &AzMap,
    max_zones: Option<usize>,
) -> Vec<(String, PlacementPlan)> {
    counts
        .candidate_regions
        .iter()
        .filter_map(|region| {
            let zones = zones_for(az_map, region, max_zones);
            place(counts, &zones).ok().map(|plan| (region.clone(), plan))
        })
        .collect()
}
