pub mod approval;
pub mod health;
pub mod workflow;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /approvals                 request lifecycle, decisions, queries
/// /workflow-definitions      definition management
/// ```
///
/// `/health` is mounted at the root, outside this tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/approvals", approval::router())
        .nest("/workflow-definitions", workflow::router())
}
