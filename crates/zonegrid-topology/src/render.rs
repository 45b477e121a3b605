//! The rendering capability boundary.
//!
//! A [`Renderer`] holds the state of exactly one diagram at a time, from
//! [`Renderer::begin_diagram`] to [`Renderer::finish`]. It is not reentrant:
//! regions must be rendered one after another, and callers sharing an
//! output directory must serialize whole runs themselves.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;
use zonegrid_core::LayoutConfig;

use crate::error::{RenderError, RenderResult};
use crate::graph::{Cluster, Member, NodeId, TopologyGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Gateway,
    LoadBalancer,
    NatGateway,
    Compute,
    Storage,
    DatabaseWriter,
    DatabaseReader,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Gateway => "internet-gateway",
            NodeKind::LoadBalancer => "load-balancer",
            NodeKind::NatGateway => "nat-gateway",
            NodeKind::Compute => "compute",
            NodeKind::Storage => "storage",
            NodeKind::DatabaseWriter => "database-writer",
            NodeKind::DatabaseReader => "database-reader",
        }
    }
}

/// Opaque handle a renderer returns for a node it created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub usize);

/// Graph-level layout attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    pub direction: String,
    pub nodesep: String,
    pub ranksep: String,
    pub splines: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::from(&LayoutConfig::default())
    }
}

impl From<&LayoutConfig> for LayoutOptions {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            direction: config.direction.clone(),
            nodesep: config.nodesep.clone(),
            ranksep: config.ranksep.clone(),
            splines: config.splines.clone(),
        }
    }
}

/// A diagram backend.
///
/// Clusters nest through an explicit begin/end stack. Nodes land in the
/// innermost open cluster, or at diagram level when none is open.
pub trait Renderer {
    fn begin_diagram(
        &mut self,
        title: &str,
        output_name: &str,
        layout: &LayoutOptions,
    ) -> RenderResult<()>;

    fn begin_cluster(&mut self, label: &str) -> RenderResult<()>;

    fn end_cluster(&mut self) -> RenderResult<()>;

    fn create_node(&mut self, kind: NodeKind, label: &str) -> RenderResult<NodeHandle>;

    fn connect(&mut self, source: NodeHandle, target: NodeHandle) -> RenderResult<()>;

    /// Close the diagram and write the artifact. Returns where it was written.
    fn finish(&mut self) -> RenderResult<PathBuf>;

    /// Drop any half-built diagram after a failure.
    fn abort(&mut self) {}
}

/// Render `graph` through `renderer` and confirm the artifact exists.
pub fn render<R: Renderer + ?Sized>(
    graph: &TopologyGraph,
    renderer: &mut R,
    layout: &LayoutOptions,
) -> RenderResult<PathBuf> {
    renderer.begin_diagram(&graph.title, &graph.region, layout)?;

    let result = emit(graph, renderer).and_then(|()| renderer.finish());
    let path = match result {
        Ok(path) => path,
        Err(e) => {
            renderer.abort();
            return Err(e);
        }
    };

    if !path.exists() {
        return Err(RenderError::ArtifactMissing(path));
    }

    debug!(region = %graph.region, path = %path.display(), "rendered diagram");
    Ok(path)
}

fn emit<R: Renderer + ?Sized>(graph: &TopologyGraph, renderer: &mut R) -> RenderResult<()> {
    let mut handles = HashMap::with_capacity(graph.nodes.len());
    emit_members(graph, &graph.root, renderer, &mut handles)?;

    for edge in &graph.edges {
        let (Some(&source), Some(&target)) = (handles.get(&edge.source), handles.get(&edge.target))
        else {
            return Err(RenderError::Scope(format!(
                "edge {:?} -> {:?} references a node outside the cluster tree",
                edge.source, edge.target
            )));
        };
        renderer.connect(source, target)?;
    }
    Ok(())
}

fn emit_members<R: Renderer + ?Sized>(
    graph: &TopologyGraph,
    cluster: &Cluster,
    renderer: &mut R,
    handles: &mut HashMap<NodeId, NodeHandle>,
) -> RenderResult<()> {
    for member in &cluster.members {
        match member {
            Member::Node(id) => {
                let node = graph.node(*id).ok_or_else(|| {
                    RenderError::Scope(format!("{id:?} is not a node of this graph"))
                })?;
                let handle = renderer.create_node(node.kind, &node.label)?;
                handles.insert(*id, handle);
            }
            Member::Cluster(child) => {
                renderer.begin_cluster(&child.label)?;
                emit_members(graph, child, renderer, handles)?;
                renderer.end_cluster()?;
            }
        }
    }
    Ok(())
}
