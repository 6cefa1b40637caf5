//! Route definitions for the approval request lifecycle and queries.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::approval;
use crate::state::AppState;

/// Approval routes, nested under `/approvals`.
///
/// ```text
/// POST   /                                           create_request
/// GET    /pending                                    list_pending
/// POST   /{id}/decision                              decide
/// POST   /{id}/cancel                                cancel
/// GET    /{id}/can-approve                           can_approve
/// GET    /entity/{entity_type}/{entity_id}           entity_status
/// GET    /entity/{entity_type}/{entity_id}/history   entity_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(approval::create_request))
        .route("/pending", get(approval::list_pending))
        .route("/{id}/decision", post(approval::decide))
        .route("/{id}/cancel", post(approval::cancel))
        .route("/{id}/can-approve", get(approval::can_approve))
        .route(
            "/entity/{entity_type}/{entity_id}",
            get(approval::entity_status),
        )
        .route(
            "/entity/{entity_type}/{entity_id}/history",
            get(approval::entity_history),
        )
}
