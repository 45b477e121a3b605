//! Placement engine — spreads resources across availability zones.
//!
//! Every resource type is placed independently: resource `i` goes to
//! `zones[i % zones.len()]`. Database roles are then assigned by walking
//! the placed indices zone-major, which is the same order the topology
//! builder emits nodes in:
//! 1. The first database index encountered becomes the writer
//! 2. Every later index becomes a reader of that writer

use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use zonegrid_core::ResourceCounts;

use crate::labels;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    /// Callers are expected to skip regions without zones instead.
    #[error("cannot place resources: zone list is empty")]
    NoZones,
}

/// Resources assigned to one availability zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZonePlacement {
    pub zone: String,
    /// Compute labels in ascending index order.
    pub compute: Vec<String>,
    /// Storage labels in ascending index order.
    pub storage: Vec<String>,
    /// 0-based database indices in ascending order.
    pub database: Vec<usize>,
}

impl ZonePlacement {
    fn new(zone: &str) -> Self {
        Self {
            zone: zone.to_string(),
            compute: Vec::new(),
            storage: Vec::new(),
            database: Vec::new(),
        }
    }

    /// A zone with nothing assigned is left out of the diagram.
    pub fn is_empty(&self) -> bool {
        self.compute.is_empty() && self.storage.is_empty() && self.database.is_empty()
    }
}

/// A database instance and the zone it was placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseInstance {
    pub zone: String,
    pub index: usize,
    pub label: String,
}

/// Placement decision for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementPlan {
    /// One entry per input zone, in input order. Empty zones are kept.
    pub zones: Vec<ZonePlacement>,
    /// Present iff at least one database was requested.
    pub writer: Option<DatabaseInstance>,
    /// Every other database instance, in zone-major order.
    pub readers: Vec<DatabaseInstance>,
}

impl PlacementPlan {
    pub fn zone(&self, zone: &str) -> Option<&ZonePlacement> {
        self.zones.iter().find(|z| z.zone == zone)
    }

    pub fn is_writer(&self, index: usize) -> bool {
        self.writer.as_ref().is_some_and(|w| w.index == index)
    }

    /// Zones that will appear in the diagram.
    pub fn occupied_zones(&self) -> impl Iterator<Item = &ZonePlacement> {
        self.zones.iter().filter(|z| !z.is_empty())
    }

    pub fn compute_count(&self) -> usize {
        self.zones.iter().map(|z| z.compute.len()).sum()
    }

    pub fn storage_count(&self) -> usize {
        self.zones.iter().map(|z| z.storage.len()).sum()
    }

    pub fn database_count(&self) -> usize {
        self.zones.iter().map(|z| z.database.len()).sum()
    }
}

/// Distribute `count` indices over `zones` buckets by `index % zones`.
///
/// Returns one bucket per zone; each bucket is in ascending order.
/// Returns an empty vector if `zones` is zero.
pub fn round_robin(count: u32, zones: usize) -> Vec<Vec<usize>> {
    if zones == 0 {
        return Vec::new();
    }
    let mut buckets = vec![Vec::new(); zones];
    for i in 0..count as usize {
        buckets[i % zones].push(i);
    }
    buckets
}

/// Compute the placement of `counts` across `zones`.
pub fn place(counts: &ResourceCounts, zones: &[String]) -> Result<PlacementPlan, PlacementError> {
    if zones.is_empty() {
        return Err(PlacementError::NoZones);
    }

    let compute = round_robin(counts.compute, zones.len());
    let storage = round_robin(counts.object_storage, zones.len());
    let database = round_robin(counts.database, zones.len());

    let mut placements: Vec<ZonePlacement> = zones.iter().map(|z| ZonePlacement::new(z)).collect();
    for (slot, placement) in placements.iter_mut().enumerate() {
        placement.compute = compute[slot].iter().map(|&i| labels::compute(i)).collect();
        placement.storage = storage[slot].iter().map(|&i| labels::storage(i)).collect();
        placement.database = database[slot].clone();
    }

    let mut writer: Option<DatabaseInstance> = None;
    let mut readers = Vec::new();
    for placement in &placements {
        for &index in &placement.database {
            if writer.is_none() {
                writer = Some(DatabaseInstance {
                    zone: placement.zone.clone(),
                    index,
                    label: labels::DATABASE_WRITER.to_string(),
                });
            } else {
                readers.push(DatabaseInstance {
                    zone: placement.zone.clone(),
                    index,
                    label: labels::database_reader(index),
                });
            }
        }
    }

    debug!(
        zones = zones.len(),
        compute = counts.compute,
        storage = counts.object_storage,
        database = counts.database,
        writer_zone = writer.as_ref().map(|w| w.zone.as_str()),
        readers = readers.len(),
        "computed placement"
    );

    Ok(PlacementPlan {
        zones: placements,
        writer,
        readers,
    })
}
