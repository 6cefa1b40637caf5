//! Route definitions for workflow definition management.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::workflow;
use crate::state::AppState;

/// Workflow definition routes, nested under `/workflow-definitions`.
///
/// ```text
/// POST   /                  create_definition (admin)
/// GET    /{entity_type}     get_active
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(workflow::create_definition))
        .route("/{entity_type}", get(workflow::get_active))
}
