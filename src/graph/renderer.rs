use std::collections::HashSet;
use std::io::Write;

use miette::Result;

use crate::core::{ProcessId, ResourceId};
use crate::detector::DeadlockCycle;
use crate::error::RagError;
use crate::store::RagSnapshot;

mod colors {
    pub const PROCESS_FILL: &str = "#E3F2FD"; // Light blue
    pub const PROCESS_STROKE: &str = "#1976D2"; // Medium blue
    pub const RESOURCE_FILL: &str = "#F1F8E9"; // Light green
    pub const RESOURCE_STROKE: &str = "#689F38"; // Olive green
    pub const DEADLOCK_FILL: &str = "#FFF3E0"; // Light orange
    pub const DEADLOCK_STROKE: &str = "#F57C00"; // Vibrant orange
    pub const REQUEST_EDGE: &str = "#64B5F6"; // Soft blue
    pub const ALLOCATION_EDGE: &str = "#81C784"; // Soft green
    pub const DEADLOCK_EDGE: &str = "#FF6500"; // Deep orange
}

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(RagError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(RagError::from)
    };
}

/// Processes and edges taking part in a deadlock, for quick lookup
#[derive(Default)]
struct Highlight {
    processes: HashSet<ProcessId>,
    requests: HashSet<(ProcessId, ResourceId)>,
    allocations: HashSet<(ResourceId, ProcessId)>,
}

impl Highlight {
    fn from_cycle(cycle: Option<&DeadlockCycle>) -> Self {
        let mut highlight = Self::default();
        for step in cycle.into_iter().flat_map(|c| c.steps()) {
            highlight.processes.insert(step.process);
            highlight.requests.insert((step.process, step.resource));
            highlight.allocations.insert((step.resource, step.next));
        }
        highlight
    }

    fn has_resource(&self, resource: ResourceId) -> bool {
        self.allocations.iter().any(|&(r, _)| r == resource)
    }
}

/// Renders a resource allocation graph as text, Graphviz DOT or Mermaid
pub struct RagRenderer {
    highlight_cycle: bool,
}

impl RagRenderer {
    pub fn new(highlight_cycle: bool) -> Self {
        Self { highlight_cycle }
    }

    fn highlight(&self, cycle: Option<&DeadlockCycle>) -> Highlight {
        if self.highlight_cycle {
            Highlight::from_cycle(cycle)
        } else {
            Highlight::default()
        }
    }

    /// Adjacency listing: every node followed by the nodes it points to
    pub fn render_ascii(
        &self,
        snapshot: &RagSnapshot<'_>,
        cycle: Option<&DeadlockCycle>,
        output: &mut dyn Write,
    ) -> Result<()> {
        if snapshot.process_count() == 0 && snapshot.resource_count() == 0 {
            writeln_out!(output, "No processes or resources to visualize")?;
            return Ok(());
        }

        let highlight = self.highlight(cycle);

        writeln_out!(output, "===== RAG =====")?;

        for process in snapshot.processes() {
            let mut line = format!("{}:", process.name);
            for request in snapshot.requests().filter(|r| r.process == process.id) {
                line.push_str(&format!(" -> {}", snapshot.resource_name(request.resource)));
                if highlight.requests.contains(&(request.process, request.resource)) {
                    line.push_str(" [DEADLOCK]");
                }
            }
            writeln_out!(output, "{}", line)?;
        }

        for resource in snapshot.resources() {
            let mut line = format!("{}:", resource.name);
            if let Some(owner) = snapshot.owner_of(resource.id) {
                line.push_str(&format!(" -> {}", snapshot.process_name(owner)));
                if highlight.allocations.contains(&(resource.id, owner)) {
                    line.push_str(" [DEADLOCK]");
                }
            }
            writeln_out!(output, "{}", line)?;
        }

        writeln_out!(output, "================")?;

        if self.highlight_cycle && cycle.is_some() {
            writeln_out!(output, "[DEADLOCK] = edge on the detected wait cycle")?;
        }

        Ok(())
    }

    pub fn render_dot(
        &self,
        snapshot: &RagSnapshot<'_>,
        cycle: Option<&DeadlockCycle>,
        output: &mut dyn Write,
    ) -> Result<()> {
        let highlight = self.highlight(cycle);

        writeln_out!(output, "digraph rag {{")?;
        writeln_out!(output, "    rankdir=LR;")?;
        writeln_out!(output, "    node [fontname=\"Helvetica\"];")?;
        writeln_out!(output)?;

        for process in snapshot.processes() {
            let (fill, stroke, width) = if highlight.processes.contains(&process.id) {
                (colors::DEADLOCK_FILL, colors::DEADLOCK_STROKE, 3)
            } else {
                (colors::PROCESS_FILL, colors::PROCESS_STROKE, 1)
            };
            writeln_out!(
                output,
                "    {} [label=\"{}\", shape=ellipse, style=filled, fillcolor=\"{}\", \
                 color=\"{}\", penwidth={}];",
                process_node_id(process.id),
                escape_dot(&process.name),
                fill,
                stroke,
                width
            )?;
        }

        for resource in snapshot.resources() {
            let (fill, stroke, width) = if highlight.has_resource(resource.id) {
                (colors::DEADLOCK_FILL, colors::DEADLOCK_STROKE, 3)
            } else {
                (colors::RESOURCE_FILL, colors::RESOURCE_STROKE, 1)
            };
            writeln_out!(
                output,
                "    {} [label=\"{}\", shape=box, style=filled, fillcolor=\"{}\", color=\"{}\", \
                 penwidth={}];",
                resource_node_id(resource.id),
                escape_dot(&resource.name),
                fill,
                stroke,
                width
            )?;
        }

        writeln_out!(output)?;

        for request in snapshot.requests() {
            let on_cycle = highlight
                .requests
                .contains(&(request.process, request.resource));
            writeln_out!(
                output,
                "    {} -> {} [style=dashed, color=\"{}\", penwidth={}];",
                process_node_id(request.process),
                resource_node_id(request.resource),
                if on_cycle {
                    colors::DEADLOCK_EDGE
                } else {
                    colors::REQUEST_EDGE
                },
                if on_cycle { 3 } else { 1 }
            )?;
        }

        for allocation in snapshot.allocations() {
            let on_cycle = highlight
                .allocations
                .contains(&(allocation.resource, allocation.process));
            writeln_out!(
                output,
                "    {} -> {} [style=solid, color=\"{}\", penwidth={}];",
                resource_node_id(allocation.resource),
                process_node_id(allocation.process),
                if on_cycle {
                    colors::DEADLOCK_EDGE
                } else {
                    colors::ALLOCATION_EDGE
                },
                if on_cycle { 3 } else { 2 }
            )?;
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    pub fn render_mermaid(
        &self,
        snapshot: &RagSnapshot<'_>,
        cycle: Option<&DeadlockCycle>,
        output: &mut dyn Write,
    ) -> Result<()> {
        let highlight = self.highlight(cycle);

        writeln_out!(output, "graph LR")?;

        for process in snapshot.processes() {
            let id = process_node_id(process.id);
            writeln_out!(output, "    {}((\"{}\"))", id, escape_mermaid(&process.name))?;
            let (fill, stroke) = if highlight.processes.contains(&process.id) {
                (colors::DEADLOCK_FILL, colors::DEADLOCK_STROKE)
            } else {
                (colors::PROCESS_FILL, colors::PROCESS_STROKE)
            };
            writeln_out!(output, "    style {} fill:{},stroke:{}", id, fill, stroke)?;
        }

        for resource in snapshot.resources() {
            let id = resource_node_id(resource.id);
            writeln_out!(output, "    {}[\"{}\"]", id, escape_mermaid(&resource.name))?;
            let (fill, stroke) = if highlight.has_resource(resource.id) {
                (colors::DEADLOCK_FILL, colors::DEADLOCK_STROKE)
            } else {
                (colors::RESOURCE_FILL, colors::RESOURCE_STROKE)
            };
            writeln_out!(output, "    style {} fill:{},stroke:{}", id, fill, stroke)?;
        }

        // Mermaid styles links by declaration order
        let mut link_index = 0usize;
        let mut deadlock_links = Vec::new();

        for request in snapshot.requests() {
            writeln_out!(
                output,
                "    {} -.->|requests| {}",
                process_node_id(request.process),
                resource_node_id(request.resource)
            )?;
            if highlight
                .requests
                .contains(&(request.process, request.resource))
            {
                deadlock_links.push(link_index);
            }
            link_index += 1;
        }

        for allocation in snapshot.allocations() {
            writeln_out!(
                output,
                "    {} -->|held by| {}",
                resource_node_id(allocation.resource),
                process_node_id(allocation.process)
            )?;
            if highlight
                .allocations
                .contains(&(allocation.resource, allocation.process))
            {
                deadlock_links.push(link_index);
            }
            link_index += 1;
        }

        for index in deadlock_links {
            writeln_out!(
                output,
                "    linkStyle {} stroke:{},stroke-width:3px",
                index,
                colors::DEADLOCK_EDGE
            )?;
        }

        Ok(())
    }
}

fn process_node_id(id: ProcessId) -> String {
    format!("p{}", id.index())
}

fn resource_node_id(id: ResourceId) -> String {
    format!("r{}", id.index())
}

fn escape_dot(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

fn escape_mermaid(label: &str) -> String {
    label.replace('"', "#quot;")
}
