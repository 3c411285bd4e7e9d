//! Persisted data model for workflow blueprints.
//!
//! A blueprint holds two directed workflow graphs: the system workflow
//! ("how the project works", laid out left to right) and the build workflow
//! ("how to build it", laid out top to bottom), plus a recommended tech
//! stack. User annotations (sticky notes, freehand drawings) live inside
//! the workflow they belong to so that they persist with the project.
//!
//! Serde field names match the stored project JSON format (`userNotes`,
//! `appWorkflow`, ...), so existing project files load unchanged.

pub mod id;

use serde::{Deserialize, Serialize};

/// A point in world/content space (independent of pan and zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    User,
    System,
    Data,
    Action,
    Decision,
}

/// A single step or component in a workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub details: String,
    #[serde(rename = "userNotes", default, skip_serializing_if = "Option::is_none")]
    pub user_notes: Option<String>,
    #[serde(rename = "aiSuggestions", default, skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<String>,
}

/// Directed relation between two nodes, referenced by id.
///
/// Edges whose endpoints do not resolve to a node in the same workflow are
/// tolerated: leveling ignores them and rendering skips them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEdge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    Yellow,
    Blue,
    Green,
    Pink,
}

/// Movable feedback note anchored in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickyNote {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub color: NoteColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingKind {
    Freehand,
    Line,
}

/// A committed freehand stroke or straight line.
///
/// A `Line` keeps exactly two points (start and final end); `Freehand`
/// accumulates one point per pointer move. Drawings are never edited after
/// commit, only cleared wholesale when the owning workflow is reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DrawingKind,
    pub points: Vec<Point>,
    pub color: String,
}

/// A directed graph of workflow nodes plus the annotations layered on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
    // Older stored projects predate annotations and omit these fields.
    #[serde(rename = "stickyNotes", default)]
    pub sticky_notes: Vec<StickyNote>,
    #[serde(default)]
    pub drawings: Vec<Drawing>,
}

impl Workflow {
    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut WorkflowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

/// One category of the recommended tech stack (rendered as a static panel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechItem {
    pub category: String,
    pub tools: Vec<String>,
    #[serde(default)]
    pub reason: String,
}

/// The generated plan for a project, reduced to the parts the canvas owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    #[serde(rename = "appWorkflow", default)]
    pub system_workflow: Workflow,
    #[serde(rename = "implementationWorkflow", default)]
    pub build_workflow: Workflow,
    #[serde(rename = "techStack", default)]
    pub tech_stack: Vec<TechItem>,
}

/// The authoritative project record. The canvas never mutates it in place;
/// every change produces a replacement pushed through the update callback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub blueprint: Blueprint,
}
