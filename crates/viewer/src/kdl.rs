//! KDL blueprint parsing.
//!
//! A blueprint file has three top-level sections:
//!
//! ```kdl
//! system {
//!     node "visitor" type="user" label="Visitor" details="Someone browsing"
//!     node "webapp" type="system" label="Web app"
//!     edge from="visitor" to="webapp" label="uses"
//! }
//! build {
//!     node "scaffold" type="action" label="Scaffold the repo"
//!     edge from="scaffold" to="deploy"
//! }
//! stack {
//!     category "Frontend" reason="familiar to the team" {
//!         tool "React"
//!         tool "Tailwind"
//!     }
//! }
//! ```
//!
//! Nodes with an unknown `type` are skipped with a warning; edges whose
//! endpoints never resolve are kept, since the layout tolerates them.

use anyhow::{bail, Context};
use flowmap_model::{
    Blueprint, NodeKind, TechItem, Workflow, WorkflowEdge, WorkflowNode,
};
use kdl::{KdlDocument, KdlNode};
use tracing::warn;

pub fn parse_blueprint(content: &str) -> anyhow::Result<Blueprint> {
    let doc = KdlDocument::parse(content).context("invalid KDL")?;

    let mut blueprint = Blueprint::default();
    for section in doc.nodes() {
        match section.name().value() {
            "system" => blueprint.system_workflow = parse_workflow(section)?,
            "build" => blueprint.build_workflow = parse_workflow(section)?,
            "stack" => blueprint.tech_stack = parse_stack(section),
            other => warn!(section = other, "skipping unknown section"),
        }
    }
    Ok(blueprint)
}

fn parse_workflow(section: &KdlNode) -> anyhow::Result<Workflow> {
    let mut workflow = Workflow::default();
    let Some(children) = section.children() else {
        return Ok(workflow);
    };

    // First pass: nodes, so edges can refer to any of them in any order.
    for child in children.nodes() {
        if child.name().value() != "node" {
            continue;
        }
        let id = first_argument(child)
            .with_context(|| format!("node without an id in '{}'", section.name().value()))?;
        let Some(kind) = property(child, "type").and_then(parse_kind) else {
            warn!(id, "skipping node with missing or unknown type");
            continue;
        };
        workflow.nodes.push(WorkflowNode {
            id: id.to_string(),
            label: property(child, "label").unwrap_or(id).to_string(),
            kind,
            details: property(child, "details").unwrap_or_default().to_string(),
            user_notes: property(child, "notes").map(str::to_string),
            ai_suggestions: None,
        });
    }

    for child in children.nodes() {
        match child.name().value() {
            "edge" => {
                let (Some(from), Some(to)) = (property(child, "from"), property(child, "to"))
                else {
                    bail!("edge needs from= and to= in '{}'", section.name().value());
                };
                workflow.edges.push(WorkflowEdge {
                    from: from.to_string(),
                    to: to.to_string(),
                    label: property(child, "label").map(str::to_string),
                });
            }
            "node" => {}
            other => warn!(entry = other, "skipping unknown workflow entry"),
        }
    }

    Ok(workflow)
}

fn parse_stack(section: &KdlNode) -> Vec<TechItem> {
    let Some(children) = section.children() else {
        return Vec::new();
    };
    children
        .nodes()
        .iter()
        .filter(|child| child.name().value() == "category")
        .filter_map(|child| {
            let category = first_argument(child)?.to_string();
            let tools = child
                .children()
                .map(|tools| {
                    tools
                        .nodes()
                        .iter()
                        .filter(|t| t.name().value() == "tool")
                        .filter_map(first_argument)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            Some(TechItem {
                category,
                tools,
                reason: property(child, "reason").unwrap_or_default().to_string(),
            })
        })
        .collect()
}

fn parse_kind(value: &str) -> Option<NodeKind> {
    match value {
        "user" => Some(NodeKind::User),
        "system" => Some(NodeKind::System),
        "data" => Some(NodeKind::Data),
        "action" => Some(NodeKind::Action),
        "decision" => Some(NodeKind::Decision),
        _ => None,
    }
}

/// First positional argument of a node (entries without a name).
fn first_argument(node: &KdlNode) -> Option<&str> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
}

fn property<'a>(node: &'a KdlNode, key: &str) -> Option<&'a str> {
    node.entries()
        .iter()
        .find(|e| e.name().map(|n| n.value() == key).unwrap_or(false))
        .and_then(|e| e.value().as_string())
}
