//! Handlers for the approval workflow engine.
//!
//! Thin HTTP shims over [`ApprovalEngine`] and the approval repositories:
//! the engine is the authority on state transitions and step authorization;
//! handlers translate auth claims into an actor, log the outcome, and wrap
//! responses in the standard envelope.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use hrflow_core::entity::EntityType;
use hrflow_core::types::DbId;
use hrflow_db::engine::ApprovalEngine;
use hrflow_db::models::approval::{CreateApprovalRequest, DecisionRequest};
use hrflow_db::repositories::{ApprovalActionRepo, ApprovalRequestRepo};

use hrflow_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/approvals
///
/// Open an approval request for a business entity at step 1.
pub async fn create_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateApprovalRequest>,
) -> AppResult<impl IntoResponse> {
    let request =
        ApprovalEngine::create_request(&state.pool, auth.organization_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        request_id = request.id,
        entity_type = %input.entity_type,
        entity_id = input.entity_id,
        "Approval request opened"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// POST /api/v1/approvals/{id}/decision
///
/// Record an approve/reject decision at the request's current step.
pub async fn decide(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<impl IntoResponse> {
    let request = ApprovalEngine::decide(
        &state.pool,
        request_id,
        &auth.actor(),
        &input.outcome,
        input.comments.as_deref(),
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        request_id = request.id,
        outcome = %input.outcome,
        status = %request.status,
        step = request.current_step,
        "Approval decision recorded"
    );

    Ok(Json(DataResponse { data: request }))
}

/// POST /api/v1/approvals/{id}/cancel
///
/// Withdraw a pending request. Requester-only.
pub async fn cancel(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let requester_id = auth.require_employee_id()?;
    ApprovalEngine::cancel(&state.pool, request_id, requester_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        request_id = request_id,
        "Approval request cancelled"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/approvals/pending
///
/// Every pending request whose current step the caller may decide. A pull
/// query, not a push queue; clients re-poll for freshness.
pub async fn list_pending(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests = ApprovalRequestRepo::list_pending_for(
        &state.pool,
        auth.organization_id,
        &auth.role,
        auth.employee_id,
    )
    .await?;
    Ok(Json(DataResponse { data: requests }))
}

#[derive(Debug, Serialize)]
pub struct CanApproveResponse {
    pub can_approve: bool,
}

/// GET /api/v1/approvals/{id}/can-approve
///
/// Whether the caller may decide this request right now.
pub async fn can_approve(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let allowed = ApprovalEngine::can_approve(&state.pool, request_id, &auth.actor()).await?;
    Ok(Json(DataResponse {
        data: CanApproveResponse {
            can_approve: allowed,
        },
    }))
}

/// GET /api/v1/approvals/entity/{entity_type}/{entity_id}
///
/// The latest approval request for an entity. 404 when none exists --
/// callers render that as "no approval in progress".
pub async fn entity_status(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((entity_type, entity_id)): Path<(EntityType, DbId)>,
) -> AppResult<impl IntoResponse> {
    let request = ApprovalRequestRepo::find_latest_for_entity(&state.pool, entity_type, entity_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ApprovalRequest",
            id: entity_id,
        }))?;
    Ok(Json(DataResponse { data: request }))
}

/// GET /api/v1/approvals/entity/{entity_type}/{entity_id}/history
///
/// The entity's decision history, oldest first, with approver names.
/// Empty when the entity has no request.
pub async fn entity_history(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((entity_type, entity_id)): Path<(EntityType, DbId)>,
) -> AppResult<impl IntoResponse> {
    let actions =
        ApprovalActionRepo::history_for_entity(&state.pool, entity_type, entity_id).await?;
    Ok(Json(DataResponse { data: actions }))
}
