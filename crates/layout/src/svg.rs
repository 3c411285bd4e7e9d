//! SVG snapshot rendering for a laid-out blueprint.
//!
//! Draws both workflows stacked on one page: the system graph (horizontal)
//! above the build graph (vertical), with the tech-stack panel in the top
//! left corner, and the system workflow's annotations (sticky notes,
//! drawings) on top of its graph.

use std::path::Path as FsPath;

use flowmap_model::{Blueprint, Drawing, DrawingKind, NodeKind, NoteColor, StickyNote, Workflow};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Line, Marker, Path, Polygon, Rectangle, Text};

use crate::place::Layout;
use crate::types::{CubicCurve, LayoutResult, Orientation, PlacedNode};

const INK: &str = "#1e293b";
const NOTE_WIDTH: f64 = 160.0;
const NOTE_HEIGHT: f64 = 110.0;
const SECTION_GAP: f64 = 160.0;
const STACK_PANEL_WIDTH: f64 = 320.0;

fn note_fill(color: NoteColor) -> &'static str {
    match color {
        NoteColor::Yellow => "#fef9c3",
        NoteColor::Blue => "#dbeafe",
        NoteColor::Green => "#dcfce7",
        NoteColor::Pink => "#fce7f3",
    }
}

fn curve_data(curve: &CubicCurve) -> Data {
    Data::new()
        .move_to((curve.start.x, curve.start.y))
        .cubic_curve_to((
            curve.control1.x,
            curve.control1.y,
            curve.control2.x,
            curve.control2.y,
            curve.end.x,
            curve.end.y,
        ))
}

fn node_shape(node: &PlacedNode) -> Group {
    let rect = node.rect;
    let center = rect.center();
    let mut group = Group::new();

    group = match node.kind {
        NodeKind::User => group.add(
            Circle::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("r", rect.width / 2.0)
                .set("fill", "white")
                .set("stroke", INK)
                .set("stroke-width", 3),
        ),
        NodeKind::Action => group.add(
            Rectangle::new()
                .set("x", rect.x)
                .set("y", rect.y)
                .set("width", rect.width)
                .set("height", rect.height)
                .set("rx", rect.height / 2.0)
                .set("fill", "white")
                .set("stroke", INK),
        ),
        _ => {
            let rx = if node.kind == NodeKind::Data { 8 } else { 12 };
            group.add(
                Rectangle::new()
                    .set("x", rect.x)
                    .set("y", rect.y)
                    .set("width", rect.width)
                    .set("height", rect.height)
                    .set("rx", rx)
                    .set("fill", "white")
                    .set("stroke", INK)
                    .set("stroke-width", 2),
            )
        }
    };

    group.add(
        Text::new(node.label.clone())
            .set("x", center.x)
            .set("y", center.y + 4.0)
            .set("font-family", "Arial")
            .set("font-size", 12)
            .set("font-weight", "bold")
            .set("text-anchor", "middle")
            .set("fill", INK),
    )
}

fn edge_group(result: &LayoutResult) -> Group {
    let mut group = Group::new();
    for edge in &result.edges {
        group = group.add(
            Path::new()
                .set("d", curve_data(&edge.curve))
                .set("stroke", INK)
                .set("stroke-width", 2)
                .set("fill", "none")
                .set("marker-end", "url(#arrowhead)"),
        );
        if let Some(label) = &edge.label {
            group = group.add(
                Text::new(label.clone())
                    .set("x", edge.label_anchor.x)
                    .set("y", edge.label_anchor.y - 6.0)
                    .set("font-family", "Arial")
                    .set("font-size", 10)
                    .set("text-anchor", "middle")
                    .set("fill", "#475569"),
            );
        }
    }
    group
}

fn drawing_shape(drawing: &Drawing) -> Option<Path> {
    match drawing.kind {
        DrawingKind::Line if drawing.points.len() >= 2 => {
            let first = drawing.points[0];
            let last = drawing.points[drawing.points.len() - 1];
            let data = Data::new().move_to((first.x, first.y)).line_to((last.x, last.y));
            Some(
                Path::new()
                    .set("d", data)
                    .set("stroke", drawing.color.clone())
                    .set("stroke-width", 2)
                    .set("stroke-dasharray", "5,5")
                    .set("fill", "none"),
            )
        }
        DrawingKind::Freehand if !drawing.points.is_empty() => {
            let mut data = Data::new().move_to((drawing.points[0].x, drawing.points[0].y));
            for p in &drawing.points[1..] {
                data = data.line_to((p.x, p.y));
            }
            Some(
                Path::new()
                    .set("d", data)
                    .set("stroke", drawing.color.clone())
                    .set("stroke-width", 2)
                    .set("stroke-linecap", "round")
                    .set("fill", "none"),
            )
        }
        _ => None,
    }
}

fn note_shape(note: &StickyNote) -> Group {
    let mut group = Group::new().add(
        Rectangle::new()
            .set("x", note.x)
            .set("y", note.y)
            .set("width", NOTE_WIDTH)
            .set("height", NOTE_HEIGHT)
            .set("fill", note_fill(note.color))
            .set("stroke", "#94a3b8"),
    );
    // One line per row of note text; overflow is clipped by eye, not code.
    for (i, line) in note.content.lines().take(5).enumerate() {
        group = group.add(
            Text::new(line.to_string())
                .set("x", note.x + 8.0)
                .set("y", note.y + 20.0 + i as f64 * 14.0)
                .set("font-family", "Arial")
                .set("font-size", 11)
                .set("fill", INK),
        );
    }
    group
}

/// One workflow's graph plus its annotations, in that layout's own
/// coordinate space.
pub fn render_workflow(result: &LayoutResult, workflow: &Workflow) -> Group {
    let mut group = Group::new().add(edge_group(result));
    for node in &result.nodes {
        group = group.add(node_shape(node));
    }
    for drawing in &workflow.drawings {
        if let Some(shape) = drawing_shape(drawing) {
            group = group.add(shape);
        }
    }
    for note in &workflow.sticky_notes {
        group = group.add(note_shape(note));
    }
    group
}

fn tech_panel(blueprint: &Blueprint) -> Group {
    let mut group = Group::new();
    let mut y = 28.0;
    group = group.add(
        Text::new("Recommended tech stack")
            .set("x", 12.0)
            .set("y", y)
            .set("font-family", "Arial")
            .set("font-size", 13)
            .set("font-weight", "bold")
            .set("fill", INK),
    );
    for item in &blueprint.tech_stack {
        y += 22.0;
        group = group.add(
            Text::new(format!("{}: {}", item.category, item.tools.join(", ")))
                .set("x", 12.0)
                .set("y", y)
                .set("font-family", "Arial")
                .set("font-size", 11)
                .set("fill", "#475569"),
        );
    }
    group.add(
        Rectangle::new()
            .set("x", 4.0)
            .set("y", 8.0)
            .set("width", STACK_PANEL_WIDTH)
            .set("height", y + 12.0)
            .set("fill", "none")
            .set("stroke", INK)
            .set("stroke-width", 2)
            .set("rx", 10),
    )
}

/// Full-page snapshot of a blueprint.
pub fn render_blueprint(blueprint: &Blueprint, layout: &Layout) -> Document {
    let system = layout.layout(&blueprint.system_workflow, Orientation::Horizontal);
    let build = layout.layout(&blueprint.build_workflow, Orientation::Vertical);

    // System graph sits to the right of the tech panel; build graph below.
    let system_x = STACK_PANEL_WIDTH + 40.0;
    let build_y = system.canvas_height + SECTION_GAP;
    let width = (system_x + system.canvas_width).max(build.canvas_width);
    let height = build_y + build.canvas_height;

    let arrowhead = Marker::new()
        .set("id", "arrowhead")
        .set("markerWidth", 10)
        .set("markerHeight", 7)
        .set("refX", 9)
        .set("refY", 3.5)
        .set("orient", "auto")
        .add(Polygon::new().set("points", "0 0, 10 3.5, 0 7").set("fill", INK));

    Document::new()
        .set("width", width)
        .set("height", height)
        .set("xmlns", "http://www.w3.org/2000/svg")
        .add(arrowhead)
        .add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", "white"),
        )
        .add(tech_panel(blueprint))
        .add(
            render_workflow(&system, &blueprint.system_workflow)
                .set("transform", format!("translate({system_x} 0)")),
        )
        .add(
            Line::new()
                .set("x1", 0)
                .set("y1", build_y - SECTION_GAP / 2.0)
                .set("x2", width)
                .set("y2", build_y - SECTION_GAP / 2.0)
                .set("stroke", "#cbd5e1"),
        )
        .add(
            render_workflow(&build, &blueprint.build_workflow)
                .set("transform", format!("translate(0 {build_y})")),
        )
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write svg: {0}")]
    Io(#[from] std::io::Error),
}

pub fn write_svg(document: &Document, path: impl AsRef<FsPath>) -> Result<(), RenderError> {
    svg::save(path, document)?;
    Ok(())
}
