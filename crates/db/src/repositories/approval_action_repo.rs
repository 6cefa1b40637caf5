//! Read paths for the append-only `approval_actions` table.
//!
//! Action rows are only ever inserted by the engine, inside the decision
//! transaction; they are never updated or deleted.

use sqlx::PgPool;

use hrflow_core::entity::EntityType;
use hrflow_core::types::DbId;

use crate::models::approval::{ApprovalAction, ApprovalActionWithApprover};

/// Column list for approval_actions queries.
pub(crate) const ACTION_COLUMNS: &str = "id, request_id, step_number, approver_id, \
    outcome, comments, created_at, updated_at";

/// Provides read operations for the approval audit trail.
pub struct ApprovalActionRepo;

impl ApprovalActionRepo {
    /// List all actions for a request, oldest first.
    pub async fn list_for_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<ApprovalAction>, sqlx::Error> {
        let query = format!(
            "SELECT {ACTION_COLUMNS} FROM approval_actions
             WHERE request_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ApprovalAction>(&query)
            .bind(request_id)
            .fetch_all(pool)
            .await
    }

    /// The decision history for an entity's latest request, joined with
    /// approver names, oldest first. Empty when the entity has no request.
    pub async fn history_for_entity(
        pool: &PgPool,
        entity_type: EntityType,
        entity_id: DbId,
    ) -> Result<Vec<ApprovalActionWithApprover>, sqlx::Error> {
        sqlx::query_as::<_, ApprovalActionWithApprover>(
            "SELECT a.id, a.request_id, a.step_number, a.approver_id,
                    e.full_name AS approver_name, a.outcome, a.comments, a.created_at
             FROM approval_actions a
             JOIN employees e ON e.id = a.approver_id
             WHERE a.request_id = (
                 SELECT id FROM approval_requests
                 WHERE entity_type = $1 AND entity_id = $2
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1
             )
             ORDER BY a.created_at ASC, a.id ASC",
        )
        .bind(entity_type.as_str())
        .bind(entity_id)
        .fetch_all(pool)
        .await
    }

    /// Count actions recorded against a request.
    pub async fn count_for_request(pool: &PgPool, request_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM approval_actions WHERE request_id = $1")
                .bind(request_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
