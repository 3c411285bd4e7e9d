use crate::refine::CollaboratorError;

#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("a refinement is already in flight")]
    RefinementInFlight,

    #[error("refinement token is stale (generation {0})")]
    StaleRefinementToken(u64),

    #[error("refinement needs at least one sticky note as feedback")]
    NoFeedbackNotes,

    #[error("no node is selected")]
    NoNodeSelected,

    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}
