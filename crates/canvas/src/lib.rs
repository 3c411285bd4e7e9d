//! Interactive canvas state for workflow blueprints.
//!
//! This crate is deliberately headless: it owns the project, the pan/zoom
//! viewport, tool selection, annotation editing and blueprint refinement,
//! and exposes them through plain method calls so any frontend (or a test)
//! can drive it with pointer coordinates and read the resulting state.

mod canvas;
mod error;
mod refine;
mod tool;
mod viewport;

pub use canvas::WorkflowCanvas;
pub use error::CanvasError;
pub use refine::{
    Collaborator, CollaboratorError, RefinementGuard, RefinementOutcome, RefinementToken,
};
pub use tool::{PointerButton, Tool};
pub use viewport::{Viewport, ZOOM_IN_FACTOR, ZOOM_MAX, ZOOM_MIN, ZOOM_OUT_FACTOR};
