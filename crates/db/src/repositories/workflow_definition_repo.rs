//! Repository for the `workflow_definitions` and `workflow_steps` tables.

use sqlx::{PgConnection, PgPool};

use hrflow_core::entity::EntityType;
use hrflow_core::types::DbId;
use hrflow_core::workflow::StepSpec;

use crate::models::workflow::{
    WorkflowDefinition, WorkflowDefinitionWithSteps, WorkflowStep,
};

/// Column list for workflow_definitions queries.
const DEFINITION_COLUMNS: &str = "id, organization_id, entity_type, is_active, \
    created_at, updated_at";

/// Column list for workflow_steps queries.
const STEP_COLUMNS: &str = "id, workflow_definition_id, step_order, approver_role, \
    required, created_at, updated_at";

/// Provides operations for workflow definitions and their steps.
pub struct WorkflowDefinitionRepo;

impl WorkflowDefinitionRepo {
    /// Insert a new definition with its steps and make it the single active
    /// one for its (organization, entity type), deactivating any previously
    /// active definition in the same transaction.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        entity_type: EntityType,
        steps: &[StepSpec],
    ) -> Result<WorkflowDefinitionWithSteps, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE workflow_definitions SET is_active = false
             WHERE organization_id = $1 AND entity_type = $2 AND is_active",
        )
        .bind(organization_id)
        .bind(entity_type.as_str())
        .execute(&mut *tx)
        .await?;

        let insert_query = format!(
            "INSERT INTO workflow_definitions (organization_id, entity_type, is_active)
             VALUES ($1, $2, true)
             RETURNING {DEFINITION_COLUMNS}"
        );
        let definition = sqlx::query_as::<_, WorkflowDefinition>(&insert_query)
            .bind(organization_id)
            .bind(entity_type.as_str())
            .fetch_one(&mut *tx)
            .await?;

        let step_query = format!(
            "INSERT INTO workflow_steps
                (workflow_definition_id, step_order, approver_role, required)
             VALUES ($1, $2, $3, $4)
             RETURNING {STEP_COLUMNS}"
        );
        let mut rows = Vec::with_capacity(steps.len());
        for step in steps {
            let row = sqlx::query_as::<_, WorkflowStep>(&step_query)
                .bind(definition.id)
                .bind(step.order)
                .bind(&step.role)
                .bind(step.required)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(WorkflowDefinitionWithSteps {
            definition,
            steps: rows,
        })
    }

    /// Find a definition by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkflowDefinition>, sqlx::Error> {
        let query = format!("SELECT {DEFINITION_COLUMNS} FROM workflow_definitions WHERE id = $1");
        sqlx::query_as::<_, WorkflowDefinition>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the single active definition for an (organization, entity type).
    ///
    /// `None` is not an error: it signals the implicit single-step fallback
    /// policy, which every caller handles explicitly.
    pub async fn find_active(
        pool: &PgPool,
        organization_id: DbId,
        entity_type: EntityType,
    ) -> Result<Option<WorkflowDefinitionWithSteps>, sqlx::Error> {
        let query = format!(
            "SELECT {DEFINITION_COLUMNS} FROM workflow_definitions
             WHERE organization_id = $1 AND entity_type = $2 AND is_active"
        );
        let definition = sqlx::query_as::<_, WorkflowDefinition>(&query)
            .bind(organization_id)
            .bind(entity_type.as_str())
            .fetch_optional(pool)
            .await?;

        match definition {
            Some(definition) => {
                let steps = Self::steps_for(pool, definition.id).await?;
                Ok(Some(WorkflowDefinitionWithSteps { definition, steps }))
            }
            None => Ok(None),
        }
    }

    /// List a definition's steps in order.
    pub async fn steps_for(
        pool: &PgPool,
        definition_id: DbId,
    ) -> Result<Vec<WorkflowStep>, sqlx::Error> {
        let query = format!(
            "SELECT {STEP_COLUMNS} FROM workflow_steps
             WHERE workflow_definition_id = $1
             ORDER BY step_order ASC"
        );
        sqlx::query_as::<_, WorkflowStep>(&query)
            .bind(definition_id)
            .fetch_all(pool)
            .await
    }

    /// List a definition's steps in order, on an open transaction.
    ///
    /// Used by the engine so the steps a decision is computed against are
    /// read in the same transaction as the request update.
    pub async fn steps_for_conn(
        conn: &mut PgConnection,
        definition_id: DbId,
    ) -> Result<Vec<WorkflowStep>, sqlx::Error> {
        let query = format!(
            "SELECT {STEP_COLUMNS} FROM workflow_steps
             WHERE workflow_definition_id = $1
             ORDER BY step_order ASC"
        );
        sqlx::query_as::<_, WorkflowStep>(&query)
            .bind(definition_id)
            .fetch_all(conn)
            .await
    }
}
