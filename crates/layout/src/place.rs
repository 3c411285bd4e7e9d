//! Deterministic coordinate assignment.
//!
//! The leveler only decides grouping; this pass turns (level index, index
//! within level) into world-space rectangles with fixed spacing. Layout is
//! a pure function of the workflow, so connector geometry can be computed
//! from the same coordinates instead of being measured back from rendered
//! output.

use flowmap_model::{NodeKind, Workflow, WorkflowEdge, WorkflowNode};

use crate::level::compute_levels;
use crate::path::route_edges;
use crate::types::{LayoutResult, Orientation, PlacedNode, Rect, Size};

/// Spacing configuration, in world units.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Gap between consecutive levels along the flow axis.
    pub level_gap: f64,
    /// Gap between sibling nodes across the flow axis.
    pub lane_gap: f64,
    /// Padding around the content on every side.
    pub margin: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            level_gap: 256.0,
            lane_gap: 128.0,
            margin: 80.0,
        }
    }
}

/// Fixed node footprint per kind, matching the rendered card dimensions.
pub fn node_size(kind: NodeKind) -> Size {
    match kind {
        NodeKind::User => Size {
            width: 112.0,
            height: 112.0,
        },
        NodeKind::Action => Size {
            width: 150.0,
            height: 40.0,
        },
        NodeKind::System | NodeKind::Data | NodeKind::Decision => Size {
            width: 240.0,
            height: 96.0,
        },
    }
}

impl Layout {
    /// Level groups, place, and route one workflow.
    pub fn layout(&self, workflow: &Workflow, orientation: Orientation) -> LayoutResult {
        let nodes = self.place(&workflow.nodes, &workflow.edges, orientation);
        let edges = route_edges(&nodes, &workflow.edges, orientation);
        let (canvas_width, canvas_height) = self.canvas_size(&nodes);
        LayoutResult {
            nodes,
            edges,
            canvas_width,
            canvas_height,
        }
    }

    /// Assign every node a rectangle from its level group and lane index.
    ///
    /// Levels advance along the flow axis, each level as wide (or tall) as
    /// its largest member; groups are centered across the cross axis so a
    /// two-node level lines up with a five-node one.
    pub fn place(
        &self,
        nodes: &[WorkflowNode],
        edges: &[WorkflowEdge],
        orientation: Orientation,
    ) -> Vec<PlacedNode> {
        let groups = compute_levels(nodes, edges);
        if groups.is_empty() {
            return Vec::new();
        }

        // Cross-axis extent of a group: member sizes plus gaps.
        let cross_extent = |group: &[usize]| -> f64 {
            let sizes: f64 = group
                .iter()
                .map(|&i| {
                    let s = node_size(nodes[i].kind);
                    match orientation {
                        Orientation::Horizontal => s.height,
                        Orientation::Vertical => s.width,
                    }
                })
                .sum();
            sizes + self.lane_gap * (group.len().saturating_sub(1)) as f64
        };

        let max_cross = groups
            .iter()
            .map(|g| cross_extent(g))
            .fold(0.0f64, f64::max);

        let mut placed = Vec::with_capacity(nodes.len());
        let mut flow_pos = self.margin;
        for group in &groups {
            let group_flow_extent = group
                .iter()
                .map(|&i| {
                    let s = node_size(nodes[i].kind);
                    match orientation {
                        Orientation::Horizontal => s.width,
                        Orientation::Vertical => s.height,
                    }
                })
                .fold(0.0f64, f64::max);

            let mut cross_pos = self.margin + (max_cross - cross_extent(group)) / 2.0;
            for &i in group {
                let node = &nodes[i];
                let size = node_size(node.kind);
                let rect = match orientation {
                    Orientation::Horizontal => {
                        // Center each node within its column's width.
                        let r = Rect {
                            x: flow_pos + (group_flow_extent - size.width) / 2.0,
                            y: cross_pos,
                            width: size.width,
                            height: size.height,
                        };
                        cross_pos += size.height + self.lane_gap;
                        r
                    }
                    Orientation::Vertical => {
                        let r = Rect {
                            x: cross_pos,
                            y: flow_pos + (group_flow_extent - size.height) / 2.0,
                            width: size.width,
                            height: size.height,
                        };
                        cross_pos += size.width + self.lane_gap;
                        r
                    }
                };
                placed.push(PlacedNode {
                    id: node.id.clone(),
                    label: node.label.clone(),
                    kind: node.kind,
                    rect,
                });
            }
            flow_pos += group_flow_extent + self.level_gap;
        }
        placed
    }

    fn canvas_size(&self, nodes: &[PlacedNode]) -> (f64, f64) {
        let mut max_x = 0.0f64;
        let mut max_y = 0.0f64;
        for node in nodes {
            max_x = max_x.max(node.rect.x + node.rect.width);
            max_y = max_y.max(node.rect.y + node.rect.height);
        }
        ((max_x + self.margin).max(400.0), (max_y + self.margin).max(300.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, kind: NodeKind) -> WorkflowNode {
        WorkflowNode {
            id: id.into(),
            label: id.to_uppercase(),
            kind,
            details: String::new(),
            user_notes: None,
            ai_suggestions: None,
        }
    }

    fn edge(from: &str, to: &str) -> WorkflowEdge {
        WorkflowEdge {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    fn chain() -> (Vec<WorkflowNode>, Vec<WorkflowEdge>) {
        (
            vec![
                node("a", NodeKind::User),
                node("b", NodeKind::System),
                node("c", NodeKind::Data),
            ],
            vec![edge("a", "b"), edge("b", "c")],
        )
    }

    #[test]
    fn horizontal_levels_advance_along_x() {
        let (nodes, edges) = chain();
        let placed = Layout::default().place(&nodes, &edges, Orientation::Horizontal);
        assert_eq!(placed.len(), 3);
        assert!(placed[0].rect.x < placed[1].rect.x);
        assert!(placed[1].rect.x < placed[2].rect.x);
    }

    #[test]
    fn vertical_levels_advance_along_y() {
        let (nodes, edges) = chain();
        let placed = Layout::default().place(&nodes, &edges, Orientation::Vertical);
        assert!(placed[0].rect.y < placed[1].rect.y);
        assert!(placed[1].rect.y < placed[2].rect.y);
    }

    #[test]
    fn siblings_do_not_overlap() {
        let nodes = vec![
            node("root", NodeKind::User),
            node("x", NodeKind::System),
            node("y", NodeKind::System),
            node("z", NodeKind::Action),
        ];
        let edges = vec![edge("root", "x"), edge("root", "y"), edge("root", "z")];
        let placed = Layout::default().place(&nodes, &edges, Orientation::Horizontal);
        // The three siblings share a column; their vertical spans are disjoint.
        let mut spans: Vec<(f64, f64)> = placed[1..]
            .iter()
            .map(|p| (p.rect.y, p.rect.y + p.rect.height))
            .collect();
        spans.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        assert!(spans[0].1 < spans[1].0);
        assert!(spans[1].1 < spans[2].0);
    }

    #[test]
    fn placement_is_deterministic() {
        let (nodes, edges) = chain();
        let layout = Layout::default();
        let a = layout.place(&nodes, &edges, Orientation::Horizontal);
        let b = layout.place(&nodes, &edges, Orientation::Horizontal);
        assert_eq!(a, b);
    }

    #[test]
    fn canvas_covers_content_plus_margin() {
        let (nodes, edges) = chain();
        let layout = Layout::default();
        let result = layout.layout(
            &Workflow {
                nodes,
                edges,
                ..Default::default()
            },
            Orientation::Horizontal,
        );
        for node in &result.nodes {
            assert!(node.rect.x + node.rect.width <= result.canvas_width);
            assert!(node.rect.y + node.rect.height <= result.canvas_height);
        }
    }

    #[test]
    fn empty_workflow_yields_empty_result() {
        let result = Layout::default().layout(&Workflow::default(), Orientation::Horizontal);
        assert!(result.nodes.is_empty());
        assert!(result.edges.is_empty());
    }
}
