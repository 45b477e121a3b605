//! Graphviz backend.
//!
//! Writes `{output_dir}/{name}.dot` and, for png/svg output, runs the
//! Graphviz executable to produce `{output_dir}/{name}.{ext}` next to it.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};
use zonegrid_core::OutputFormat;

use crate::error::{RenderError, RenderResult};
use crate::render::{LayoutOptions, NodeHandle, NodeKind, Renderer};

fn shape(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Gateway => "doubleoctagon",
        NodeKind::LoadBalancer => "hexagon",
        NodeKind::NatGateway => "diamond",
        NodeKind::Compute => "box3d",
        NodeKind::Storage => "folder",
        NodeKind::DatabaseWriter | NodeKind::DatabaseReader => "cylinder",
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// The output name becomes a file stem inside the output directory, so it
/// must be a single plain path component.
fn check_output_name(name: &str) -> RenderResult<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(RenderError::Scope(format!(
            "{name:?} cannot be used as a diagram file name"
        )));
    }
    Ok(())
}

/// State of the diagram currently being written.
#[derive(Debug)]
struct DotDiagram {
    output_name: String,
    body: String,
    depth: usize,
    nodes: usize,
    clusters: usize,
    edges: Vec<(usize, usize)>,
}

impl DotDiagram {
    fn indent(&mut self) {
        for _ in 0..=self.depth {
            self.body.push_str("  ");
        }
    }
}

#[derive(Debug)]
pub struct DotRenderer {
    output_dir: PathBuf,
    format: OutputFormat,
    graphviz: String,
    current: Option<DotDiagram>,
}

impl DotRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
            graphviz: "dot".to_string(),
            current: None,
        }
    }

    /// Use a specific Graphviz executable for png/svg output.
    pub fn with_graphviz(mut self, graphviz: impl Into<String>) -> Self {
        self.graphviz = graphviz.into();
        self
    }

    fn diagram(&mut self) -> RenderResult<&mut DotDiagram> {
        self.current
            .as_mut()
            .ok_or_else(|| RenderError::Scope("no diagram is open".to_string()))
    }

    fn run_graphviz(&self, source: &Path, target: &Path) -> RenderResult<()> {
        let mut cmd = Command::new(&self.graphviz);
        cmd.arg(format!("-T{}", self.format.extension()))
            .arg(source)
            .arg("-o")
            .arg(target);

        debug!("Running: {:?}", cmd);

        let output = cmd.output().map_err(|e| {
            RenderError::Backend(format!("failed to execute {}: {e}", self.graphviz))
        })?;

        if !output.status.success() {
            return Err(RenderError::Backend(format!(
                "{} exited with code {}: {}",
                self.graphviz,
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

impl Renderer for DotRenderer {
    fn begin_diagram(
        &mut self,
        title: &str,
        output_name: &str,
        layout: &LayoutOptions,
    ) -> RenderResult<()> {
        if let Some(open) = &self.current {
            return Err(RenderError::Scope(format!(
                "diagram {} is still open",
                open.output_name
            )));
        }

        check_output_name(output_name)?;

        let mut body = String::new();
        let title = escape(title);
        let _ = writeln!(body, "digraph \"{title}\" {{");
        let _ = writeln!(
            body,
            "  graph [label=\"{title}\", labelloc=\"t\", fontsize=\"20\", rankdir=\"{}\", nodesep=\"{}\", ranksep=\"{}\", splines=\"{}\"];",
            escape(&layout.direction),
            escape(&layout.nodesep),
            escape(&layout.ranksep),
            escape(&layout.splines),
        );
        body.push_str("  node [fontsize=\"11\"];\n");

        self.current = Some(DotDiagram {
            output_name: output_name.to_string(),
            body,
            depth: 0,
            nodes: 0,
            clusters: 0,
            edges: Vec::new(),
        });
        Ok(())
    }

    fn begin_cluster(&mut self, label: &str) -> RenderResult<()> {
        let d = self.diagram()?;
        let id = d.clusters;
        d.clusters += 1;
        d.indent();
        let _ = writeln!(d.body, "subgraph cluster_{id} {{");
        d.depth += 1;
        d.indent();
        let _ = writeln!(d.body, "label=\"{}\";", escape(label));
        Ok(())
    }

    fn end_cluster(&mut self) -> RenderResult<()> {
        let d = self.diagram()?;
        if d.depth == 0 {
            return Err(RenderError::Scope("end_cluster without an open cluster".to_string()));
        }
        d.depth -= 1;
        d.indent();
        d.body.push_str("}\n");
        Ok(())
    }

    fn create_node(&mut self, kind: NodeKind, label: &str) -> RenderResult<NodeHandle> {
        let d = self.diagram()?;
        let id = d.nodes;
        d.nodes += 1;
        d.indent();
        let _ = writeln!(
            d.body,
            "n{id} [label=\"{}\", shape=\"{}\", class=\"{}\"];",
            escape(label),
            shape(kind),
            kind.name()
        );
        Ok(NodeHandle(id))
    }

    fn connect(&mut self, source: NodeHandle, target: NodeHandle) -> RenderResult<()> {
        let d = self.diagram()?;
        if source.0 >= d.nodes || target.0 >= d.nodes {
            return Err(RenderError::Scope(format!(
                "edge n{} -> n{} references an unknown node",
                source.0, target.0
            )));
        }
        d.edges.push((source.0, target.0));
        Ok(())
    }

    fn finish(&mut self) -> RenderResult<PathBuf> {
        let mut d = self
            .current
            .take()
            .ok_or_else(|| RenderError::Scope("no diagram is open".to_string()))?;
        if d.depth != 0 {
            return Err(RenderError::Scope(format!("{} cluster(s) left open", d.depth)));
        }

        for (source, target) in &d.edges {
            let _ = writeln!(d.body, "  n{source} -> n{target};");
        }
        d.body.push_str("}\n");

        fs::create_dir_all(&self.output_dir).map_err(|source| RenderError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        let dot_path = self.output_dir.join(format!("{}.dot", d.output_name));
        fs::write(&dot_path, &d.body).map_err(|source| RenderError::Io {
            path: dot_path.clone(),
            source,
        })?;

        let artifact = if self.format.needs_graphviz() {
            let target = self
                .output_dir
                .join(format!("{}.{}", d.output_name, self.format.extension()));
            self.run_graphviz(&dot_path, &target)?;
            target
        } else {
            dot_path
        };

        info!(
            diagram = %d.output_name,
            nodes = d.nodes,
            edges = d.edges.len(),
            path = %artifact.display(),
            "wrote diagram"
        );
        Ok(artifact)
    }

    fn abort(&mut self) {
        if let Some(d) = self.current.take() {
            debug!(diagram = %d.output_name, "discarding unfinished diagram");
        }
    }
}
