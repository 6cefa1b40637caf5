//! Shared seed helpers for db integration tests.

use sqlx::PgPool;

use hrflow_core::entity::EntityType;
use hrflow_core::types::DbId;
use hrflow_core::workflow::StepSpec;
use hrflow_db::repositories::WorkflowDefinitionRepo;

/// Insert an organization, returning its id.
pub async fn seed_org(pool: &PgPool, name: &str) -> DbId {
    let row: (DbId,) = sqlx::query_as("INSERT INTO organizations (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

/// Insert an employee, returning their id.
pub async fn seed_employee(
    pool: &PgPool,
    org_id: DbId,
    full_name: &str,
    role: &str,
    manager_id: Option<DbId>,
) -> DbId {
    let row: (DbId,) = sqlx::query_as(
        "INSERT INTO employees (organization_id, full_name, role, manager_id)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(org_id)
    .bind(full_name)
    .bind(role)
    .bind(manager_id)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

/// Insert a leave request entity row, returning its id.
pub async fn seed_leave(pool: &PgPool, org_id: DbId, employee_id: DbId) -> DbId {
    let row: (DbId,) = sqlx::query_as(
        "INSERT INTO leave_requests (organization_id, employee_id, starts_on, ends_on, reason)
         VALUES ($1, $2, '2026-09-01', '2026-09-05', 'vacation') RETURNING id",
    )
    .bind(org_id)
    .bind(employee_id)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

/// Insert a payroll run entity row, returning its id.
pub async fn seed_payroll_run(pool: &PgPool, org_id: DbId) -> DbId {
    let row: (DbId,) = sqlx::query_as(
        "INSERT INTO payroll_runs
            (organization_id, period_month, gross_total, deduction_total, net_total)
         VALUES ($1, '2026-08-01', 120000.00, 34000.00, 86000.00) RETURNING id",
    )
    .bind(org_id)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

/// Create an active workflow definition from (role, required) pairs,
/// returning its id.
pub async fn seed_definition(
    pool: &PgPool,
    org_id: DbId,
    entity_type: EntityType,
    steps: &[(&str, bool)],
) -> DbId {
    let specs: Vec<StepSpec> = steps
        .iter()
        .enumerate()
        .map(|(i, (role, required))| StepSpec {
            order: i as i32 + 1,
            role: role.to_string(),
            required: *required,
        })
        .collect();
    WorkflowDefinitionRepo::create(pool, org_id, entity_type, &specs)
        .await
        .unwrap()
        .definition
        .id
}
