//! Workflow definition models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hrflow_core::entity::EntityType;
use hrflow_core::types::{DbId, Timestamp};
use hrflow_core::workflow::StepSpec;

/// A row from the `workflow_definitions` table.
///
/// Definitions are immutable once referenced by a request; "editing" one
/// means deactivating it and creating a replacement. In-flight requests keep
/// the definition id they were created with.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkflowDefinition {
    pub id: DbId,
    pub organization_id: DbId,
    pub entity_type: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `workflow_steps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkflowStep {
    pub id: DbId,
    pub workflow_definition_id: DbId,
    pub step_order: i32,
    pub approver_role: String,
    pub required: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl WorkflowStep {
    /// View of this row as the core crate's step type.
    pub fn to_spec(&self) -> StepSpec {
        StepSpec {
            order: self.step_order,
            role: self.approver_role.clone(),
            required: self.required,
        }
    }
}

/// A definition together with its ordered steps.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowDefinitionWithSteps {
    #[serde(flatten)]
    pub definition: WorkflowDefinition,
    pub steps: Vec<WorkflowStep>,
}

/// Request body for creating a workflow definition.
///
/// The new definition becomes the single active one for its
/// (organization, entity type); any previously active definition is
/// deactivated in the same transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkflowDefinition {
    pub entity_type: EntityType,
    pub steps: Vec<StepSpec>,
}
