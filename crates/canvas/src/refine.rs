//! Blueprint refinement: feeding sticky-note feedback to a collaborator
//! and swapping in the revised blueprint atomically.
//!
//! At most one refinement can be outstanding at a time. Instead of a
//! boolean "busy" flag, `begin` hands out a generation-numbered token that
//! must be returned to `apply` or `fail`; a token from an abandoned
//! attempt is rejected rather than silently clobbering newer state.

use flowmap_model::{StickyNote, TechItem, Workflow};
use tracing::warn;

use crate::error::CanvasError;

/// A revised blueprint produced by a collaborator from sticky-note
/// feedback.
#[derive(Debug, Clone)]
pub struct RefinementOutcome {
    pub system_workflow: Workflow,
    pub build_workflow: Workflow,
    pub tech_stack: Vec<TechItem>,
}

#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("collaborator request failed: {0}")]
    Request(String),
    #[error("collaborator returned a malformed blueprint: {0}")]
    Malformed(String),
}

/// Something that can revise a blueprint and answer questions about it.
pub trait Collaborator {
    /// Produce a revised blueprint from the current one plus the feedback
    /// notes pinned to the canvas.
    fn refine(
        &self,
        system: &Workflow,
        build: &Workflow,
        tech_stack: &[TechItem],
        feedback: &[StickyNote],
    ) -> Result<RefinementOutcome, CollaboratorError>;

    /// Answer a free-form question about one node, given the suggestion
    /// history already attached to it.
    fn answer(
        &self,
        node_label: &str,
        history: &str,
        question: &str,
    ) -> Result<String, CollaboratorError>;
}

/// Proof that a refinement was started. Not cloneable; consumed exactly
/// once by `apply` or `fail`.
#[derive(Debug)]
pub struct RefinementToken {
    generation: u64,
}

impl RefinementToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct RefinementGuard {
    in_flight: Option<u64>,
    next_generation: u64,
}

impl RefinementGuard {
    pub fn in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn begin(&mut self) -> Result<RefinementToken, CanvasError> {
        if self.in_flight.is_some() {
            return Err(CanvasError::RefinementInFlight);
        }
        let generation = self.next_generation;
        self.next_generation += 1;
        self.in_flight = Some(generation);
        Ok(RefinementToken { generation })
    }

    /// Retire a token. Errors if the token is not the one currently in
    /// flight.
    pub fn finish(&mut self, token: RefinementToken) -> Result<(), CanvasError> {
        match self.in_flight {
            Some(current) if current == token.generation => {
                self.in_flight = None;
                Ok(())
            }
            _ => {
                warn!(generation = token.generation, "stale refinement token");
                Err(CanvasError::StaleRefinementToken(token.generation))
            }
        }
    }
}
