//! zonegrid placement engine.
//!
//! Decides which availability zone each requested resource lands in and
//! which database instance acts as the writer. Pure and deterministic:
//! nothing here touches the filesystem or the renderer.
//!
//! # Components
//!
//! - **`placer`** — Round-robin spread and database role assignment
//! - **`labels`** — Display labels shared with the topology builder

pub mod labels;
pub mod placer;

pub use placer::{
    DatabaseInstance, PlacementError, PlacementPlan, ZonePlacement, place, round_robin,
};
