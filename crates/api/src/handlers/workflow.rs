//! Handlers for workflow definition management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use hrflow_core::entity::EntityType;
use hrflow_core::error::CoreError;
use hrflow_core::workflow;
use hrflow_db::models::workflow::CreateWorkflowDefinition;
use hrflow_db::repositories::WorkflowDefinitionRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/workflow-definitions
///
/// Install a new active definition for an entity type. Any previously
/// active definition is deactivated in the same transaction; in-flight
/// requests keep the definition they captured at creation. Admin only.
pub async fn create_definition(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateWorkflowDefinition>,
) -> AppResult<impl IntoResponse> {
    workflow::validate_steps(&input.steps).map_err(CoreError::Validation)?;

    let definition = WorkflowDefinitionRepo::create(
        &state.pool,
        auth.organization_id,
        input.entity_type,
        &input.steps,
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        definition_id = definition.definition.id,
        entity_type = %input.entity_type,
        steps = input.steps.len(),
        "Workflow definition installed"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: definition })))
}

/// GET /api/v1/workflow-definitions/{entity_type}
///
/// The active definition for an entity type. `data` is null when none is
/// installed, meaning new requests use the implicit line-manager policy.
pub async fn get_active(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(entity_type): Path<EntityType>,
) -> AppResult<impl IntoResponse> {
    let definition =
        WorkflowDefinitionRepo::find_active(&state.pool, auth.organization_id, entity_type).await?;
    Ok(Json(DataResponse { data: definition }))
}
