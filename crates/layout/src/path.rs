//! Connector curve construction.
//!
//! Every edge becomes a cubic Bezier between the endpoint node centers.
//! Control points sit on the flow axis, offset from each endpoint by half
//! the distance between them, which yields the S-curve shape suited to
//! level-ordered layouts.

use flowmap_model::{Point, WorkflowEdge};

use crate::types::{CubicCurve, EdgePath, Orientation, PlacedNode};

pub fn route_edges(
    placed: &[PlacedNode],
    edges: &[WorkflowEdge],
    orientation: Orientation,
) -> Vec<EdgePath> {
    let center = |id: &str| placed.iter().find(|n| n.id == id).map(|n| n.rect.center());

    let mut paths = Vec::with_capacity(edges.len());
    for edge in edges {
        let (Some(start), Some(end)) = (center(&edge.from), center(&edge.to)) else {
            // Endpoint not placed (unknown id); the edge is unrenderable.
            tracing::debug!(from = %edge.from, to = %edge.to, "skipping edge without placed endpoints");
            continue;
        };

        let curve = connector(start, end, orientation);
        paths.push(EdgePath {
            from: edge.from.clone(),
            to: edge.to.clone(),
            curve,
            label: edge.label.clone(),
            label_anchor: Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0),
        });
    }
    paths
}

pub fn connector(start: Point, end: Point, orientation: Orientation) -> CubicCurve {
    match orientation {
        Orientation::Horizontal => {
            let offset = (end.x - start.x).abs() * 0.5;
            CubicCurve {
                start,
                control1: Point::new(start.x + offset, start.y),
                control2: Point::new(end.x - offset, end.y),
                end,
            }
        }
        Orientation::Vertical => {
            let offset = (end.y - start.y).abs() * 0.5;
            CubicCurve {
                start,
                control1: Point::new(start.x, start.y + offset),
                control2: Point::new(end.x, end.y - offset),
                end,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rect;
    use flowmap_model::NodeKind;

    fn placed(id: &str, x: f64, y: f64) -> PlacedNode {
        PlacedNode {
            id: id.into(),
            label: id.to_uppercase(),
            kind: NodeKind::System,
            rect: Rect {
                x,
                y,
                width: 100.0,
                height: 50.0,
            },
        }
    }

    fn edge(from: &str, to: &str) -> WorkflowEdge {
        WorkflowEdge {
            from: from.into(),
            to: to.into(),
            label: Some("step".into()),
        }
    }

    #[test]
    fn horizontal_controls_offset_along_x() {
        let curve = connector(
            Point::new(0.0, 0.0),
            Point::new(200.0, 80.0),
            Orientation::Horizontal,
        );
        assert_eq!(curve.control1, Point::new(100.0, 0.0));
        assert_eq!(curve.control2, Point::new(100.0, 80.0));
    }

    #[test]
    fn vertical_controls_offset_along_y() {
        let curve = connector(
            Point::new(0.0, 0.0),
            Point::new(80.0, 200.0),
            Orientation::Vertical,
        );
        assert_eq!(curve.control1, Point::new(0.0, 100.0));
        assert_eq!(curve.control2, Point::new(80.0, 100.0));
    }

    #[test]
    fn label_anchor_is_midpoint() {
        let nodes = vec![placed("a", 0.0, 0.0), placed("b", 300.0, 100.0)];
        let paths = route_edges(&nodes, &[edge("a", "b")], Orientation::Horizontal);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].label_anchor, Point::new(200.0, 75.0));
        assert_eq!(paths[0].label.as_deref(), Some("step"));
    }

    #[test]
    fn edges_with_missing_endpoints_are_skipped() {
        let nodes = vec![placed("a", 0.0, 0.0)];
        let paths = route_edges(
            &nodes,
            &[edge("a", "nowhere"), edge("ghost", "a")],
            Orientation::Horizontal,
        );
        assert!(paths.is_empty());
    }

    #[test]
    fn right_to_left_edge_still_curves() {
        // Backward edge: end left of start. The offset uses the absolute
        // distance so the curve bows outward instead of collapsing.
        let curve = connector(
            Point::new(200.0, 0.0),
            Point::new(0.0, 0.0),
            Orientation::Horizontal,
        );
        assert_eq!(curve.control1.x, 300.0);
        assert_eq!(curve.control2.x, -100.0);
    }
}
