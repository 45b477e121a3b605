//! Topology graph and the rules that build it from a placement plan.
//!
//! Nesting is tracked with an explicit cluster stack on [`GraphBuilder`]
//! rather than any ambient drawing context, so the finished
//! [`TopologyGraph`] is a plain value that can be inspected before it is
//! handed to a renderer.

use tracing::{debug, warn};
use zonegrid_placement::{PlacementPlan, labels};

use crate::render::NodeKind;

/// Index of a node within its [`TopologyGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: String,
}

/// What an edge stands for. Renderers only see source and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Gateway → load balancer / NAT gateway.
    Ingress,
    /// Load balancer → compute.
    Serve,
    /// Compute → NAT gateway.
    Egress,
    /// Database reader → writer.
    Replication,
    /// Compute → database writer.
    Query,
    /// Compute → storage bucket.
    Access,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
}

/// An entry inside a cluster, kept in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Node(NodeId),
    Cluster(Cluster),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub label: String,
    pub members: Vec<Member>,
}

impl Cluster {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            members: Vec::new(),
        }
    }

    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.members.iter().filter_map(|m| match m {
            Member::Cluster(c) => Some(c),
            Member::Node(_) => None,
        })
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.members.iter().filter_map(|m| match m {
            Member::Node(id) => Some(*id),
            Member::Cluster(_) => None,
        })
    }

    pub fn cluster(&self, label: &str) -> Option<&Cluster> {
        self.clusters().find(|c| c.label == label)
    }
}

/// The full diagram for one region.
///
/// `root` is the region itself: it holds the gateway node and one cluster
/// per occupied zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyGraph {
    pub region: String,
    pub title: String,
    pub root: Cluster,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl TopologyGraph {
    /// `None` if `id` did not come from this graph.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn find(&self, label: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.label == label)
    }

    pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    pub fn edges_of(&self, kind: EdgeKind) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    /// Zone clusters in the order they were emitted.
    pub fn zone_clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.root.clusters()
    }
}

/// Accumulates nodes and edges while a cluster stack tracks nesting.
struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    stack: Vec<Cluster>,
}

impl GraphBuilder {
    fn new(root_label: &str) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            stack: vec![Cluster::new(root_label)],
        }
    }

    fn open(&mut self, label: &str) {
        self.stack.push(Cluster::new(label));
    }

    fn close(&mut self) {
        // The root is never closed here; finish() takes it.
        if self.stack.len() > 1 {
            if let Some(done) = self.stack.pop() {
                if let Some(parent) = self.stack.last_mut() {
                    parent.members.push(Member::Cluster(done));
                }
            }
        }
    }

    fn node(&mut self, kind: NodeKind, label: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { id, kind, label });
        if let Some(current) = self.stack.last_mut() {
            current.members.push(Member::Node(id));
        }
        id
    }

    fn connect(&mut self, source: NodeId, target: NodeId, kind: EdgeKind) {
        self.edges.push(Edge {
            source,
            target,
            kind,
        });
    }

    fn finish(mut self, region: &str, title: String) -> TopologyGraph {
        while self.stack.len() > 1 {
            self.close();
        }
        let root = self.stack.pop().unwrap_or_else(|| Cluster::new(region));
        TopologyGraph {
            region: region.to_string(),
            title,
            root,
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

pub fn diagram_title(region: &str) -> String {
    format!("{region} Multi-AZ Architecture")
}

/// Build the topology graph for `region` from its placement plan.
///
/// Zones are visited in the plan's order, which is the order of the
/// region's zone list. Zones with nothing placed are left out.
pub fn build(region: &str, plan: &PlacementPlan) -> TopologyGraph {
    let mut g = GraphBuilder::new(region);
    let gateway = g.node(NodeKind::Gateway, labels::GATEWAY.to_string());

    let mut compute_nodes = Vec::new();
    let mut storage_nodes = Vec::new();
    let mut writer: Option<NodeId> = None;

    for zone in plan.occupied_zones() {
        g.open(&zone.zone);

        g.open(labels::PUBLIC_SUBNET);
        let lb = g.node(NodeKind::LoadBalancer, labels::load_balancer(&zone.zone));
        let nat = g.node(NodeKind::NatGateway, labels::nat_gateway(&zone.zone));
        g.connect(gateway, lb, EdgeKind::Ingress);
        g.connect(gateway, nat, EdgeKind::Ingress);
        g.close();

        g.open(labels::PRIVATE_SUBNET);
        for label in &zone.compute {
            let compute = g.node(NodeKind::Compute, label.clone());
            g.connect(lb, compute, EdgeKind::Serve);
            g.connect(compute, nat, EdgeKind::Egress);
            compute_nodes.push(compute);
        }
        for label in &zone.storage {
            storage_nodes.push(g.node(NodeKind::Storage, label.clone()));
        }
        for &index in &zone.database {
            let current = writer;
            match current {
                None if plan.is_writer(index) => {
                    writer = Some(g.node(
                        NodeKind::DatabaseWriter,
                        labels::DATABASE_WRITER.to_string(),
                    ));
                }
                Some(w) => {
                    let reader = g.node(NodeKind::DatabaseReader, labels::database_reader(index));
                    g.connect(reader, w, EdgeKind::Replication);
                }
                // The writer is always the first index walked; a plan that
                // says otherwise was not produced by `place`.
                None => {
                    warn!(index, zone = %zone.zone, "database index precedes writer, skipping");
                }
            }
        }
        g.close();

        g.close();
    }

    for &compute in &compute_nodes {
        if let Some(w) = writer {
            g.connect(compute, w, EdgeKind::Query);
        }
        for &storage in &storage_nodes {
            g.connect(compute, storage, EdgeKind::Access);
        }
    }

    debug!(
        region,
        zones = plan.occupied_zones().count(),
        nodes = g.nodes.len(),
        edges = g.edges.len(),
        "built topology"
    );

    g.finish(region, diagram_title(region))
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonegrid_core::ResourceCounts;
    use zonegrid_placement::place;

    fn graph(c: u32, s: u32, d: u32, zones: &[&str]) -> TopologyGraph {
        let zones: Vec<String> = zones.iter().map(|z| z.to_string()).collect();
        let plan = place(&ResourceCounts::new(c, s, d), &zones).unwrap();
        build("us-test-1", &plan)
    }

    #[test]
    fn gateway_is_region_level() {
        let g = graph(1, 0, 0, &["az-a"]);
        let gateway = g.find("Internet Gateway").unwrap();
        assert_eq!(g.root.node_ids().collect::<Vec<_>>(), vec![gateway.id]);
        assert_eq!(g.title, "us-test-1 Multi-AZ Architecture");
    }

    #[test]
    fn zone_cluster_has_public_then_private_subnet() {
        let g = graph(1, 1, 1, &["az-a"]);
        let zone = g.zone_clusters().next().unwrap();
        let tiers: Vec<&str> = zone.clusters().map(|c| c.label.as_str()).collect();
        assert_eq!(tiers, vec!["Public Subnet", "Private Subnet"]);

        let public: Vec<&str> = zone
            .cluster("Public Subnet")
            .unwrap()
            .node_ids()
            .map(|id| g.node(id).unwrap().label.as_str())
            .collect();
        assert_eq!(public, vec!["ALB-az-a", "NAT-az-a"]);

        let private: Vec<&str> = zone
            .cluster("Private Subnet")
            .unwrap()
            .node_ids()
            .map(|id| g.node(id).unwrap().label.as_str())
            .collect();
        assert_eq!(private, vec!["EC2-1", "S3-1", "RDS-Writer"]);
    }

    #[test]
    fn compute_wired_through_its_own_zone() {
        let g = graph(2, 0, 0, &["az-a", "az-b"]);
        let lb_b = g.find("ALB-az-b").unwrap().id;
        let nat_b = g.find("NAT-az-b").unwrap().id;
        let ec2_2 = g.find("EC2-2").unwrap().id;

        assert!(g.edges.contains(&Edge { source: lb_b, target: ec2_2, kind: EdgeKind::Serve }));
        assert!(g.edges.contains(&Edge { source: ec2_2, target: nat_b, kind: EdgeKind::Egress }));
    }

    #[test]
    fn readers_point_at_writer() {
        let g = graph(0, 0, 4, &["az-a", "az-b"]);
        let writer = g.find("RDS-Writer").unwrap().id;

        let replication: Vec<&Edge> = g.edges_of(EdgeKind::Replication).collect();
        assert_eq!(replication.len(), 3);
        assert!(replication.iter().all(|e| e.target == writer));
        assert_eq!(g.nodes_of(NodeKind::DatabaseWriter).count(), 1);
    }

    #[test]
    fn empty_zones_are_omitted() {
        let g = graph(1, 0, 0, &["az-a", "az-b", "az-c"]);
        let zones: Vec<&str> = g.zone_clusters().map(|c| c.label.as_str()).collect();
        assert_eq!(zones, vec!["az-a"]);
        assert!(g.find("ALB-az-b").is_none());
    }

    #[test]
    fn cross_product_edges_are_region_wide() {
        let g = graph(3, 2, 1, &["az-a", "az-b"]);
        assert_eq!(g.edges_of(EdgeKind::Access).count(), 6);
        assert_eq!(g.edges_of(EdgeKind::Query).count(), 3);
    }

    #[test]
    fn cross_edges_come_after_zone_edges() {
        let g = graph(1, 1, 1, &["az-a"]);
        let kinds: Vec<EdgeKind> = g.edges.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EdgeKind::Ingress,
                EdgeKind::Ingress,
                EdgeKind::Serve,
                EdgeKind::Egress,
                EdgeKind::Query,
                EdgeKind::Access,
            ]
        );
    }

    #[test]
    fn foreign_node_id_is_none() {
        let g = graph(1, 0, 0, &["az-a"]);
        assert_eq!(g.node(NodeId(0)).unwrap().label, "Internet Gateway");
        assert!(g.node(NodeId(g.nodes.len())).is_none());
    }
}
