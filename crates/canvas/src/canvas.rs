//! The canvas orchestrator: owns the project, the viewport, the active
//! tool and all in-progress interaction state, and routes pointer input
//! to panning, selection, note dragging or drawing.
//!
//! The project is never mutated in place. Every committed change clones
//! the blueprint, applies the change, swaps the clone in and pushes the
//! whole project through the update callback, so the host can persist it
//! without diffing.

use flowmap_layout::{Layout, LayoutResult, Orientation, Rect};
use flowmap_model::{id, Drawing, DrawingKind, NoteColor, Point, Project, StickyNote};
use tracing::debug;

use crate::error::CanvasError;
use crate::refine::{Collaborator, RefinementGuard, RefinementOutcome, RefinementToken};
use crate::tool::{PointerButton, Tool};
use crate::viewport::{Viewport, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};

/// Vertical gap between the system graph and the build graph below it.
const SECTION_GAP: f64 = 160.0;

/// Sticky note footprint in world units, for hit-testing.
const NOTE_WIDTH: f64 = 160.0;
const NOTE_HEIGHT: f64 = 110.0;

/// Stroke used for pencil and line drawings.
const DRAWING_COLOR: &str = "#1e293b";

pub struct WorkflowCanvas {
    project: Project,
    viewport: Viewport,
    tool: Tool,
    selected_node: Option<String>,
    current_drawing: Option<Drawing>,
    dragging_note: Option<String>,
    panning: bool,
    last_pointer: Point,
    refinement: RefinementGuard,
    layout: Layout,
    system_layout: LayoutResult,
    build_layout: LayoutResult,
    on_update: Box<dyn FnMut(&Project)>,
}

impl WorkflowCanvas {
    pub fn new(project: Project, on_update: Box<dyn FnMut(&Project)>) -> Self {
        let layout = Layout::default();
        let system_layout = layout.layout(&project.blueprint.system_workflow, Orientation::Horizontal);
        let build_layout = layout.layout(&project.blueprint.build_workflow, Orientation::Vertical);
        Self {
            project,
            viewport: Viewport::default(),
            tool: Tool::default(),
            selected_node: None,
            current_drawing: None,
            dragging_note: None,
            panning: false,
            last_pointer: Point::new(0.0, 0.0),
            refinement: RefinementGuard::default(),
            layout,
            system_layout,
            build_layout,
            on_update,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn selected_node(&self) -> Option<&str> {
        self.selected_node.as_deref()
    }

    pub fn system_layout(&self) -> &LayoutResult {
        &self.system_layout
    }

    pub fn build_layout(&self) -> &LayoutResult {
        &self.build_layout
    }

    /// World-space y where the build graph starts, below the system graph.
    pub fn build_origin_y(&self) -> f64 {
        self.system_layout.canvas_height + SECTION_GAP
    }

    fn relayout(&mut self) {
        self.system_layout = self
            .layout
            .layout(&self.project.blueprint.system_workflow, Orientation::Horizontal);
        self.build_layout = self
            .layout
            .layout(&self.project.blueprint.build_workflow, Orientation::Vertical);
    }

    /// Clone-modify-replace the blueprint and notify the host.
    fn commit(&mut self, mutate: impl FnOnce(&mut flowmap_model::Blueprint)) {
        let mut blueprint = self.project.blueprint.clone();
        mutate(&mut blueprint);
        self.project.blueprint = blueprint;
        (self.on_update)(&self.project);
    }

    // ---- pointer input -------------------------------------------------

    pub fn pointer_down(&mut self, button: PointerButton, screen: Point) {
        self.last_pointer = screen;

        // The secondary button pans no matter what tool is active.
        if button == PointerButton::Secondary {
            self.panning = true;
            return;
        }

        let world = self.viewport.screen_to_world(screen);

        if self.tool.is_drawing() {
            let kind = match self.tool {
                Tool::Line => DrawingKind::Line,
                _ => DrawingKind::Freehand,
            };
            self.current_drawing = Some(Drawing {
                id: id::generate(),
                kind,
                points: vec![world],
                color: DRAWING_COLOR.to_string(),
            });
            return;
        }

        // Pressing a note wins over panning, so notes stay draggable with
        // the pan tool active.
        if let Some(note_id) = self.note_at(world) {
            self.dragging_note = Some(note_id);
            return;
        }

        if self.tool == Tool::Pan {
            self.panning = true;
            return;
        }

        if let Some(node_id) = self.node_at(world) {
            self.selected_node = Some(node_id);
            return;
        }

        // Empty background: drop selection and drag the view instead.
        self.selected_node = None;
        self.panning = true;
    }

    pub fn pointer_move(&mut self, screen: Point) {
        let dx = screen.x - self.last_pointer.x;
        let dy = screen.y - self.last_pointer.y;
        self.last_pointer = screen;

        if self.panning {
            self.viewport.pan(dx, dy);
            return;
        }

        if let Some(note_id) = self.dragging_note.clone() {
            let zoom = self.viewport.zoom();
            self.commit(|bp| {
                if let Some(note) = bp
                    .system_workflow
                    .sticky_notes
                    .iter_mut()
                    .find(|n| n.id == note_id)
                {
                    note.x += dx / zoom;
                    note.y += dy / zoom;
                }
            });
            return;
        }

        if let Some(drawing) = self.current_drawing.as_mut() {
            let world = self.viewport.screen_to_world(screen);
            match drawing.kind {
                // A line keeps its start point and tracks the pointer as
                // its live end point.
                DrawingKind::Line => {
                    drawing.points.truncate(1);
                    drawing.points.push(world);
                }
                DrawingKind::Freehand => drawing.points.push(world),
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.panning = false;
        self.dragging_note = None;

        if let Some(drawing) = self.current_drawing.take() {
            let valid = match drawing.kind {
                DrawingKind::Line => drawing.points.len() == 2,
                DrawingKind::Freehand => !drawing.points.is_empty(),
            };
            if valid {
                self.commit(|bp| bp.system_workflow.drawings.push(drawing));
            } else {
                debug!(kind = ?drawing.kind, points = drawing.points.len(), "dropping degenerate drawing");
            }
        }
    }

    /// Wheel input: positive delta zooms out, negative zooms in.
    pub fn wheel(&mut self, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            ZOOM_OUT_FACTOR
        } else {
            ZOOM_IN_FACTOR
        };
        self.viewport.zoom_by(factor);
    }

    // ---- hit-testing ---------------------------------------------------

    fn note_at(&self, world: Point) -> Option<String> {
        // Later notes render on top, so scan back to front.
        self.project
            .blueprint
            .system_workflow
            .sticky_notes
            .iter()
            .rev()
            .find(|note| {
                Rect {
                    x: note.x,
                    y: note.y,
                    width: NOTE_WIDTH,
                    height: NOTE_HEIGHT,
                }
                .contains(world)
            })
            .map(|note| note.id.clone())
    }

    fn node_at(&self, world: Point) -> Option<String> {
        if let Some(node) = self
            .system_layout
            .nodes
            .iter()
            .find(|n| n.rect.contains(world))
        {
            return Some(node.id.clone());
        }
        let build_point = Point::new(world.x, world.y - self.build_origin_y());
        self.build_layout
            .nodes
            .iter()
            .find(|n| n.rect.contains(build_point))
            .map(|n| n.id.clone())
    }

    // ---- sticky notes --------------------------------------------------

    /// Drop a new empty note at the middle of the visible area, clamped
    /// so it never lands at negative world coordinates.
    pub fn add_note(&mut self, color: NoteColor) -> String {
        let center = self.viewport.center_world();
        let note = StickyNote {
            id: id::generate(),
            x: center.x.max(0.0),
            y: center.y.max(0.0),
            content: String::new(),
            color,
        };
        let note_id = note.id.clone();
        self.commit(|bp| bp.system_workflow.sticky_notes.push(note));
        note_id
    }

    pub fn update_note(&mut self, note_id: &str, content: &str) {
        let content = content.to_string();
        let note_id = note_id.to_string();
        self.commit(|bp| {
            if let Some(note) = bp
                .system_workflow
                .sticky_notes
                .iter_mut()
                .find(|n| n.id == note_id)
            {
                note.content = content;
            }
        });
    }

    pub fn delete_note(&mut self, note_id: &str) {
        let note_id = note_id.to_string();
        self.commit(|bp| bp.system_workflow.sticky_notes.retain(|n| n.id != note_id));
    }

    // ---- node annotations ----------------------------------------------

    /// Attach free-form notes to the selected node. The same node id can
    /// appear in both graphs, so both are updated.
    pub fn set_node_notes(&mut self, text: &str) -> Result<(), CanvasError> {
        let node_id = self
            .selected_node
            .clone()
            .ok_or(CanvasError::NoNodeSelected)?;
        let text = text.to_string();
        self.commit(|bp| {
            for wf in [&mut bp.system_workflow, &mut bp.build_workflow] {
                if let Some(node) = wf.node_mut(&node_id) {
                    node.user_notes = if text.is_empty() {
                        None
                    } else {
                        Some(text.clone())
                    };
                }
            }
        });
        Ok(())
    }

    /// Ask the collaborator a question about the selected node and append
    /// the exchange to that node's suggestion history.
    pub fn ask_assistant(
        &mut self,
        collaborator: &impl Collaborator,
        question: &str,
    ) -> Result<(), CanvasError> {
        let node_id = self
            .selected_node
            .clone()
            .ok_or(CanvasError::NoNodeSelected)?;
        let bp = &self.project.blueprint;
        let node = bp
            .system_workflow
            .node(&node_id)
            .or_else(|| bp.build_workflow.node(&node_id))
            .ok_or_else(|| CanvasError::UnknownNode(node_id.clone()))?;

        let history = node.ai_suggestions.clone().unwrap_or_default();
        let answer = collaborator.answer(&node.label, &history, question)?;
        let entry = format!("Q: {question}\nA: {answer}");
        self.commit(|bp| {
            for wf in [&mut bp.system_workflow, &mut bp.build_workflow] {
                if let Some(node) = wf.node_mut(&node_id) {
                    node.ai_suggestions = Some(match &node.ai_suggestions {
                        Some(existing) => format!("{existing}\n\n{entry}"),
                        None => entry.clone(),
                    });
                }
            }
        });
        Ok(())
    }

    // ---- refinement ----------------------------------------------------

    /// Start a refinement. Requires at least one sticky note as feedback
    /// and refuses to overlap with an attempt already in flight.
    pub fn begin_refinement(&mut self) -> Result<RefinementToken, CanvasError> {
        if self
            .project
            .blueprint
            .system_workflow
            .sticky_notes
            .is_empty()
        {
            return Err(CanvasError::NoFeedbackNotes);
        }
        self.refinement.begin()
    }

    /// Swap in the revised blueprint. The feedback notes are consumed
    /// (cleared), drawings are kept, and both layouts are recomputed.
    pub fn apply_refinement(
        &mut self,
        token: RefinementToken,
        outcome: RefinementOutcome,
    ) -> Result<(), CanvasError> {
        self.refinement.finish(token)?;
        let kept_drawings = self.project.blueprint.system_workflow.drawings.clone();
        self.commit(move |bp| {
            bp.system_workflow = outcome.system_workflow;
            bp.system_workflow.sticky_notes.clear();
            bp.system_workflow.drawings = kept_drawings;
            bp.build_workflow = outcome.build_workflow;
            bp.tech_stack = outcome.tech_stack;
        });
        self.relayout();
        Ok(())
    }

    /// Abandon a refinement, leaving the project untouched.
    pub fn fail_refinement(&mut self, token: RefinementToken) -> Result<(), CanvasError> {
        self.refinement.finish(token)
    }

    pub fn refinement_in_flight(&self) -> bool {
        self.refinement.in_flight()
    }

    /// Run a whole refinement synchronously against a collaborator.
    pub fn refine_with(&mut self, collaborator: &impl Collaborator) -> Result<(), CanvasError> {
        let token = self.begin_refinement()?;
        let bp = &self.project.blueprint;
        match collaborator.refine(
            &bp.system_workflow,
            &bp.build_workflow,
            &bp.tech_stack,
            &bp.system_workflow.sticky_notes,
        ) {
            Ok(outcome) => self.apply_refinement(token, outcome),
            Err(err) => {
                self.fail_refinement(token)?;
                Err(err.into())
            }
        }
    }
}
