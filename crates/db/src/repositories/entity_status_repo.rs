//! Status writes onto the originating entity tables.
//!
//! Each workflow-participating entity type owns an `approval_status` column
//! on its own table; the engine writes the value the synchronizer policy
//! computes. The write methods take a connection so the engine can include
//! them in the decision transaction.

use sqlx::{PgConnection, PgPool};

use hrflow_core::entity::EntityType;
use hrflow_core::types::DbId;

/// The table that owns a given entity type's rows.
pub fn entity_table(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Leave => "leave_requests",
        EntityType::PerDiem => "per_diem_claims",
        EntityType::Payroll => "payroll_runs",
        EntityType::Promotion => "promotion_requests",
    }
}

/// Writes synchronized approval statuses onto entity rows.
pub struct EntityStatusRepo;

impl EntityStatusRepo {
    /// Set an entity row's `approval_status`, returning whether a row in
    /// the given organization existed. A `false` return means the workflow
    /// and the business record are about to disagree (or the caller is
    /// reaching across organizations); the engine turns it into a failure
    /// and rolls the whole transaction back.
    pub async fn set_status(
        conn: &mut PgConnection,
        organization_id: DbId,
        entity_type: EntityType,
        entity_id: DbId,
        status: &str,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET approval_status = $2 WHERE id = $1 AND organization_id = $3",
            entity_table(entity_type)
        );
        let result = sqlx::query(&query)
            .bind(entity_id)
            .bind(status)
            .bind(organization_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Read an entity row's current `approval_status`.
    pub async fn get_status(
        pool: &PgPool,
        entity_type: EntityType,
        entity_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let query = format!(
            "SELECT approval_status FROM {} WHERE id = $1",
            entity_table(entity_type)
        );
        let row: Option<(String,)> = sqlx::query_as(&query)
            .bind(entity_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(status,)| status))
    }
}
