use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A decision was attempted on a request that is no longer pending.
    ///
    /// Surfaced as a 409 so callers can tell a race (or a stale screen)
    /// apart from a plain validation failure.
    #[error("Approval request {request_id} is already {status}")]
    AlreadyProcessed { request_id: DbId, status: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The originating entity's status write failed after the request state
    /// was already decided. Kept distinct from `Internal` so operators can
    /// detect a workflow/entity disagreement.
    #[error("Entity status synchronization failed for {entity_type} {entity_id}: {reason}")]
    SyncFailure {
        entity_type: &'static str,
        entity_id: DbId,
        reason: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
