//! Read paths for the `approval_requests` table.
//!
//! All writes go through [`crate::engine::ApprovalEngine`], which owns the
//! transactional decision logic.

use sqlx::PgPool;

use hrflow_core::entity::EntityType;
use hrflow_core::roles::{ROLE_ADMIN, STEP_ROLE_LINE_MANAGER};
use hrflow_core::types::DbId;

use crate::models::approval::ApprovalRequest;

/// Column list for approval_requests queries.
pub(crate) const REQUEST_COLUMNS: &str = "id, organization_id, workflow_definition_id, \
    entity_type, entity_id, requester_id, current_step, status, metadata, \
    created_at, updated_at";

/// Provides read operations for approval requests.
pub struct ApprovalRequestRepo;

impl ApprovalRequestRepo {
    /// Find a request by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ApprovalRequest>, sqlx::Error> {
        let query = format!("SELECT {REQUEST_COLUMNS} FROM approval_requests WHERE id = $1");
        sqlx::query_as::<_, ApprovalRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the most recent request for an entity, if any.
    ///
    /// At most one request per entity can be pending (partial unique index),
    /// but terminal requests accumulate; callers asking "what is this
    /// entity's approval status" want the latest.
    pub async fn find_latest_for_entity(
        pool: &PgPool,
        entity_type: EntityType,
        entity_id: DbId,
    ) -> Result<Option<ApprovalRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {REQUEST_COLUMNS} FROM approval_requests
             WHERE entity_type = $1 AND entity_id = $2
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, ApprovalRequest>(&query)
            .bind(entity_type.as_str())
            .bind(entity_id)
            .fetch_optional(pool)
            .await
    }

    /// List every pending request in an organization whose current step the
    /// given actor may decide.
    ///
    /// The filter mirrors the `can_approve` disjunction: static role match,
    /// a `line_manager` step where the actor manages the requester, or the
    /// `admin` super-role. Requests without a definition run under the
    /// implicit policy, whose single step is gated on `line_manager`
    /// (hence the COALESCE). This is a pull-style filter over open requests,
    /// re-evaluated on every call.
    pub async fn list_pending_for(
        pool: &PgPool,
        organization_id: DbId,
        role: &str,
        employee_id: Option<DbId>,
    ) -> Result<Vec<ApprovalRequest>, sqlx::Error> {
        sqlx::query_as::<_, ApprovalRequest>(
            "SELECT r.id, r.organization_id, r.workflow_definition_id, r.entity_type, \
                    r.entity_id, r.requester_id, r.current_step, r.status, r.metadata, \
                    r.created_at, r.updated_at
             FROM approval_requests r
             LEFT JOIN workflow_steps s
               ON s.workflow_definition_id = r.workflow_definition_id
              AND s.step_order = r.current_step
             WHERE r.organization_id = $1
               AND r.status = 'pending'
               AND (
                     $2 = $4
                  OR COALESCE(s.approver_role, $5) = $2
                  OR (COALESCE(s.approver_role, $5) = $5
                      AND EXISTS (
                          SELECT 1 FROM employees e
                          WHERE e.id = r.requester_id AND e.manager_id = $3
                      ))
               )
             ORDER BY r.created_at ASC, r.id ASC",
        )
        .bind(organization_id)
        .bind(role)
        .bind(employee_id)
        .bind(ROLE_ADMIN)
        .bind(STEP_ROLE_LINE_MANAGER)
        .fetch_all(pool)
        .await
    }
}
