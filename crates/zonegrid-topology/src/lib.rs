//! zonegrid topology builder.
//!
//! Turns a [`PlacementPlan`](zonegrid_placement::PlacementPlan) into a
//! nested cluster graph (region → zone → subnet tier) and drives a
//! [`Renderer`] to produce one diagram per region.
//!
//! # Components
//!
//! - **`graph`** — Topology graph and the construction rules
//! - **`render`** — The rendering capability boundary
//! - **`dot`** — Graphviz backend
//! - **`generate`** — Per-region loop and outcome report

pub mod dot;
pub mod error;
pub mod generate;
pub mod graph;
pub mod render;

pub use dot::DotRenderer;
pub use error::{RenderError, RenderResult, TopologyError};
pub use generate::{
    GenerateOptions, GenerationReport, RegionOutcome, RegionReport, generate, generate_region,
    plan_regions, zones_for,
};
pub use graph::{Cluster, Edge, EdgeKind, Member, Node, NodeId, TopologyGraph, build};
pub use render::{LayoutOptions, NodeHandle, NodeKind, Renderer, render};
