//! Approval request and action models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hrflow_core::entity::EntityType;
use hrflow_core::types::{DbId, Timestamp};

/// A row from the `approval_requests` table.
///
/// `workflow_definition_id` is NULL for requests running under the implicit
/// single-step fallback policy. `status` only ever leaves `pending`; the
/// terminal statuses (`approved`, `rejected`, `cancelled`) are immutable.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApprovalRequest {
    pub id: DbId,
    pub organization_id: DbId,
    pub workflow_definition_id: Option<DbId>,
    pub entity_type: String,
    pub entity_id: DbId,
    pub requester_id: DbId,
    pub current_step: i32,
    pub status: String,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the append-only `approval_actions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApprovalAction {
    pub id: DbId,
    pub request_id: DbId,
    pub step_number: i32,
    pub approver_id: DbId,
    pub outcome: String,
    pub comments: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An action joined with the approver's name, for history views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApprovalActionWithApprover {
    pub id: DbId,
    pub request_id: DbId,
    pub step_number: i32,
    pub approver_id: DbId,
    pub approver_name: String,
    pub outcome: String,
    pub comments: Option<String>,
    pub created_at: Timestamp,
}

/// Request body for opening an approval request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateApprovalRequest {
    pub entity_type: EntityType,
    pub entity_id: DbId,
    pub requester_id: DbId,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Request body for the decision endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionRequest {
    pub outcome: String,
    pub comments: Option<String>,
}

/// The principal acting on a request, as resolved by the caller's
/// identity provider (here, JWT claims).
#[derive(Debug, Clone)]
pub struct ApprovalActor {
    /// The actor's organization. Decisions on another organization's
    /// requests are forbidden regardless of role.
    pub organization_id: DbId,
    /// The actor's employee id, if their account is linked to an employee.
    pub employee_id: Option<DbId>,
    /// The actor's static role name.
    pub role: String,
}
