//! Employee model (the engine's view of the identity/role provider).

use serde::Serialize;
use sqlx::FromRow;

use hrflow_core::types::{DbId, Timestamp};

/// A row from the `employees` table.
///
/// `manager_id` carries the line-manager relationship the dynamic
/// `line_manager` step role resolves against. It is read at every
/// authorization check, never cached on a request.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub organization_id: DbId,
    pub full_name: String,
    pub role: String,
    pub manager_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
