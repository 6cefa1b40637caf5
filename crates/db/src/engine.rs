//! The approval engine: request lifecycle writes.
//!
//! Every mutation here runs as one Postgres transaction. The decision path
//! loads the request `FOR UPDATE`, so two racing decisions serialize on the
//! row lock and the loser observes a terminal status and fails with
//! `AlreadyProcessed` -- the action-log append, the request-state advance,
//! and the entity-status write commit or roll back together. A reader can
//! never observe an action recorded against a step the request has not
//! reached, nor a request advanced with no action on record.

use sqlx::{PgConnection, PgPool};

use hrflow_core::approval::{
    self, decide as next_state, STATUS_CANCELLED, STATUS_PENDING,
};
use hrflow_core::authz;
use hrflow_core::entity::EntityType;
use hrflow_core::error::CoreError;
use hrflow_core::sync::{self, DecisionSync};
use hrflow_core::types::DbId;
use hrflow_core::workflow::{self, StepSpec};

use crate::models::approval::{ApprovalActor, ApprovalRequest, CreateApprovalRequest};
use crate::repositories::approval_request_repo::REQUEST_COLUMNS;
use crate::repositories::entity_status_repo::entity_table;
use crate::repositories::{EmployeeRepo, EntityStatusRepo, WorkflowDefinitionRepo};

/// Error type for engine operations: a domain error or a database failure.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Partial unique index guarding one pending request per entity.
const UQ_PENDING_ENTITY: &str = "uq_approval_requests_pending_entity";

/// Drives the approval request lifecycle.
pub struct ApprovalEngine;

impl ApprovalEngine {
    /// Open an approval request at step 1.
    ///
    /// Resolves the organization's active workflow definition for the entity
    /// type (falling back to the implicit single-step policy when none is
    /// active), inserts the request as `pending`, and writes the entity's
    /// "request opened" status -- all in one transaction. Fails with
    /// `Conflict` when the entity already has a pending request, and with
    /// `NotFound` when the entity row does not exist in the organization.
    pub async fn create_request(
        pool: &PgPool,
        organization_id: DbId,
        input: &CreateApprovalRequest,
    ) -> EngineResult<ApprovalRequest> {
        let requester = EmployeeRepo::find_by_id(pool, input.requester_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Employee",
                id: input.requester_id,
            })?;
        if requester.organization_id != organization_id {
            return Err(CoreError::Validation(
                "Requester does not belong to this organization".to_string(),
            )
            .into());
        }

        let definition =
            WorkflowDefinitionRepo::find_active(pool, organization_id, input.entity_type).await?;
        let definition_id = definition.as_ref().map(|d| d.definition.id);

        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO approval_requests
                (organization_id, workflow_definition_id, entity_type, entity_id,
                 requester_id, current_step, status, metadata)
             VALUES ($1, $2, $3, $4, $5, 1, $6, $7)
             RETURNING {REQUEST_COLUMNS}"
        );
        let request = sqlx::query_as::<_, ApprovalRequest>(&insert_query)
            .bind(organization_id)
            .bind(definition_id)
            .bind(input.entity_type.as_str())
            .bind(input.entity_id)
            .bind(input.requester_id)
            .bind(STATUS_PENDING)
            .bind(input.metadata.clone().unwrap_or(serde_json::Value::Null))
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| classify_insert_error(err, input.entity_type, input.entity_id))?;

        let opened_status = sync::status_on_open(input.entity_type);
        let updated = EntityStatusRepo::set_status(
            &mut *tx,
            organization_id,
            input.entity_type,
            input.entity_id,
            opened_status,
        )
        .await?;
        if !updated {
            return Err(CoreError::NotFound {
                entity: entity_table(input.entity_type),
                id: input.entity_id,
            }
            .into());
        }

        tx.commit().await?;
        Ok(request)
    }

    /// Apply one decision to a pending request.
    ///
    /// Preconditions, in order: the outcome is valid; a rejection carries
    /// comments; the request exists; it is still `pending` (the sole
    /// idempotency guard -- a request is decided once per lifecycle, and any
    /// later attempt fails with `AlreadyProcessed`); the actor is authorized
    /// at the current step. Then, atomically: append the action row, advance
    /// or terminate the request, and write the synchronized entity status.
    pub async fn decide(
        pool: &PgPool,
        request_id: DbId,
        actor: &ApprovalActor,
        outcome: &str,
        comments: Option<&str>,
    ) -> EngineResult<ApprovalRequest> {
        approval::validate_outcome(outcome).map_err(CoreError::Validation)?;
        approval::validate_rejection_comments(outcome, comments).map_err(CoreError::Validation)?;

        let mut tx = pool.begin().await?;

        let request = lock_request(&mut tx, request_id).await?;
        if request.organization_id != actor.organization_id {
            return Err(CoreError::Forbidden(
                "This approval request belongs to a different organization".to_string(),
            )
            .into());
        }
        if request.status != STATUS_PENDING {
            return Err(CoreError::AlreadyProcessed {
                request_id,
                status: request.status,
            }
            .into());
        }

        let entity_type = parse_entity_type(&request.entity_type)?;
        let steps = load_steps(&mut *tx, request.workflow_definition_id).await?;
        let step = workflow::step_at(&steps, request.current_step).ok_or_else(|| {
            CoreError::Internal(format!(
                "Request {request_id} is at step {} but its definition has no such step",
                request.current_step
            ))
        })?;

        let is_line_manager = match actor.employee_id {
            Some(employee_id) => {
                EmployeeRepo::is_manager_of_conn(&mut *tx, employee_id, request.requester_id).await?
            }
            None => false,
        };
        if !authz::can_approve(&step.role, &actor.role, is_line_manager) {
            return Err(CoreError::Forbidden(format!(
                "Step {} of this request requires the '{}' role",
                request.current_step, step.role
            ))
            .into());
        }

        let approver_id = actor.employee_id.ok_or_else(|| {
            CoreError::Validation("Acting user has no linked employee record".to_string())
        })?;

        sqlx::query(
            "INSERT INTO approval_actions
                (request_id, step_number, approver_id, outcome, comments)
             VALUES ($1, $2, $3, $4, $5)",
        )
            .bind(request_id)
            .bind(request.current_step)
            .bind(approver_id)
            .bind(outcome)
            .bind(comments)
            .execute(&mut *tx)
            .await?;

        let transition = next_state(
            request.current_step,
            outcome,
            workflow::has_remaining_required(&steps, request.current_step),
        );

        let update_query = format!(
            "UPDATE approval_requests SET status = $2, current_step = $3
             WHERE id = $1
             RETURNING {REQUEST_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, ApprovalRequest>(&update_query)
            .bind(request_id)
            .bind(transition.status)
            .bind(transition.step)
            .fetch_one(&mut *tx)
            .await?;

        let entity_status = sync::status_on_decision(
            entity_type,
            &DecisionSync {
                step_at_decision: request.current_step,
                outcome,
                new_status: transition.status,
                new_step: transition.step,
            },
        );
        let wrote = EntityStatusRepo::set_status(
            &mut *tx,
            request.organization_id,
            entity_type,
            request.entity_id,
            entity_status,
        )
        .await?;
        if !wrote {
            // Rolls back the action and the request advance with it.
            return Err(CoreError::SyncFailure {
                entity_type: entity_type.as_str(),
                entity_id: request.entity_id,
                reason: "entity row no longer exists".to_string(),
            }
            .into());
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Cancel a pending request.
    ///
    /// Only the original requester may cancel, and only while the request is
    /// pending. Cancellation is a status, not a deletion, and writes no
    /// entity status.
    pub async fn cancel(
        pool: &PgPool,
        request_id: DbId,
        requester_id: DbId,
    ) -> EngineResult<ApprovalRequest> {
        let mut tx = pool.begin().await?;

        let request = lock_request(&mut tx, request_id).await?;
        if request.requester_id != requester_id {
            return Err(CoreError::Forbidden(
                "Only the original requester may cancel an approval request".to_string(),
            )
            .into());
        }
        if request.status != STATUS_PENDING {
            return Err(CoreError::AlreadyProcessed {
                request_id,
                status: request.status,
            }
            .into());
        }

        let update_query = format!(
            "UPDATE approval_requests SET status = $2
             WHERE id = $1
             RETURNING {REQUEST_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, ApprovalRequest>(&update_query)
            .bind(request_id)
            .bind(STATUS_CANCELLED)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Whether an actor may currently decide a request.
    ///
    /// Mirrors the decision path's preconditions: false for non-pending
    /// requests, for actors in another organization, and for actors with no
    /// linked employee record. The line-manager relationship is resolved
    /// against the employees table at call time.
    pub async fn can_approve(
        pool: &PgPool,
        request_id: DbId,
        actor: &ApprovalActor,
    ) -> EngineResult<bool> {
        let request = crate::repositories::ApprovalRequestRepo::find_by_id(pool, request_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "ApprovalRequest",
                id: request_id,
            })?;
        if request.organization_id != actor.organization_id {
            return Ok(false);
        }
        if request.status != STATUS_PENDING {
            return Ok(false);
        }
        // The decision path requires a linked employee record to attribute
        // the action to; an actor without one can never decide.
        let Some(employee_id) = actor.employee_id else {
            return Ok(false);
        };

        let steps = match request.workflow_definition_id {
            Some(definition_id) => WorkflowDefinitionRepo::steps_for(pool, definition_id)
                .await?
                .iter()
                .map(|s| s.to_spec())
                .collect(),
            None => workflow::implicit_steps(),
        };
        let step = match workflow::step_at(&steps, request.current_step) {
            Some(step) => step,
            None => return Ok(false),
        };

        let is_line_manager =
            EmployeeRepo::is_manager_of(pool, employee_id, request.requester_id).await?;
        Ok(authz::can_approve(&step.role, &actor.role, is_line_manager))
    }
}

/// Load a request with a row lock, inside an open transaction.
async fn lock_request(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    request_id: DbId,
) -> EngineResult<ApprovalRequest> {
    let query = format!("SELECT {REQUEST_COLUMNS} FROM approval_requests WHERE id = $1 FOR UPDATE");
    sqlx::query_as::<_, ApprovalRequest>(&query)
        .bind(request_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "ApprovalRequest",
                id: request_id,
            }
            .into()
        })
}

/// The steps a request runs under: its captured definition, or the implicit
/// single-step policy when it has none.
async fn load_steps(
    conn: &mut PgConnection,
    definition_id: Option<DbId>,
) -> Result<Vec<StepSpec>, sqlx::Error> {
    match definition_id {
        Some(definition_id) => {
            let rows = WorkflowDefinitionRepo::steps_for_conn(conn, definition_id).await?;
            Ok(rows.iter().map(|s| s.to_spec()).collect())
        }
        None => Ok(workflow::implicit_steps()),
    }
}

fn parse_entity_type(raw: &str) -> Result<EntityType, CoreError> {
    raw.parse::<EntityType>().map_err(CoreError::Internal)
}

/// Map a unique violation on the pending-request index to a `Conflict`.
fn classify_insert_error(err: sqlx::Error, entity_type: EntityType, entity_id: DbId) -> EngineError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some(UQ_PENDING_ENTITY)
        {
            return CoreError::Conflict(format!(
                "An approval request is already pending for {entity_type} {entity_id}"
            ))
            .into();
        }
    }
    err.into()
}
