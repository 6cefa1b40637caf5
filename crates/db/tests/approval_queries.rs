//! Integration tests for the approval query surface: pending filters,
//! authorization probes, status lookup, and history.

mod common;

use sqlx::PgPool;

use hrflow_core::approval::{OUTCOME_APPROVED, OUTCOME_REJECTED, STATUS_PENDING};
use hrflow_core::entity::EntityType;
use hrflow_core::roles::{ROLE_ADMIN, ROLE_FINANCE, ROLE_HR, ROLE_MANAGEMENT};
use hrflow_core::types::DbId;
use hrflow_db::engine::ApprovalEngine;
use hrflow_db::models::approval::{ApprovalActor, CreateApprovalRequest};
use hrflow_db::repositories::{ApprovalActionRepo, ApprovalRequestRepo};

use common::{seed_definition, seed_employee, seed_leave, seed_org, seed_payroll_run};

fn actor(org: DbId, employee_id: DbId, role: &str) -> ApprovalActor {
    ApprovalActor {
        organization_id: org,
        employee_id: Some(employee_id),
        role: role.to_string(),
    }
}

async fn open_request(
    pool: &PgPool,
    org: DbId,
    entity_type: EntityType,
    entity_id: DbId,
    requester: DbId,
) -> DbId {
    ApprovalEngine::create_request(
        pool,
        org,
        &CreateApprovalRequest {
            entity_type,
            entity_id,
            requester_id: requester,
            metadata: None,
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// The pending filter agrees with can_approve for the same actor
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn pending_filter_matches_can_approve(pool: PgPool) {
    let org = seed_org(&pool, "acme").await;
    let manager = seed_employee(&pool, org, "Morgan Manager", ROLE_MANAGEMENT, None).await;
    let requester = seed_employee(&pool, org, "Riley Requester", "employee", Some(manager)).await;
    let hr = seed_employee(&pool, org, "Harper HR", ROLE_HR, None).await;
    let finance = seed_employee(&pool, org, "Frankie Finance", ROLE_FINANCE, None).await;
    let admin = seed_employee(&pool, org, "Alex Admin", ROLE_ADMIN, None).await;

    // One request under an hr-gated definition, one under the implicit
    // line-manager fallback.
    seed_definition(&pool, org, EntityType::Payroll, &[(ROLE_HR, true)]).await;
    let run = seed_payroll_run(&pool, org).await;
    let payroll_request = open_request(&pool, org, EntityType::Payroll, run, hr).await;

    let leave = seed_leave(&pool, org, requester).await;
    let leave_request = open_request(&pool, org, EntityType::Leave, leave, requester).await;

    let actors = [
        actor(org, hr, ROLE_HR),
        actor(org, finance, ROLE_FINANCE),
        actor(org, manager, ROLE_MANAGEMENT),
        actor(org, admin, ROLE_ADMIN),
    ];
    for a in &actors {
        let pending = ApprovalRequestRepo::list_pending_for(&pool, org, &a.role, a.employee_id)
            .await
            .unwrap();
        for request_id in [payroll_request, leave_request] {
            let allowed = ApprovalEngine::can_approve(&pool, request_id, a).await.unwrap();
            let listed = pending.iter().any(|r| r.id == request_id);
            assert_eq!(
                allowed, listed,
                "can_approve and the pending filter disagree for role {} on request {request_id}",
                a.role
            );
        }
    }

    // Spot-check the expected sets.
    let hr_pending = ApprovalRequestRepo::list_pending_for(&pool, org, ROLE_HR, Some(hr))
        .await
        .unwrap();
    assert_eq!(hr_pending.len(), 1);
    assert_eq!(hr_pending[0].id, payroll_request);

    let manager_pending =
        ApprovalRequestRepo::list_pending_for(&pool, org, ROLE_MANAGEMENT, Some(manager))
            .await
            .unwrap();
    assert_eq!(manager_pending.len(), 1);
    assert_eq!(manager_pending[0].id, leave_request);

    let admin_pending = ApprovalRequestRepo::list_pending_for(&pool, org, ROLE_ADMIN, Some(admin))
        .await
        .unwrap();
    assert_eq!(admin_pending.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn decided_requests_drop_out_of_the_pending_filter(pool: PgPool) {
    let org = seed_org(&pool, "acme").await;
    let requester = seed_employee(&pool, org, "Riley Requester", "employee", None).await;
    let hr = seed_employee(&pool, org, "Harper HR", ROLE_HR, None).await;
    seed_definition(&pool, org, EntityType::Leave, &[(ROLE_HR, true)]).await;
    let leave = seed_leave(&pool, org, requester).await;
    let request_id = open_request(&pool, org, EntityType::Leave, leave, requester).await;

    ApprovalEngine::decide(&pool, request_id, &actor(org, hr, ROLE_HR), OUTCOME_APPROVED, None)
        .await
        .unwrap();

    let pending = ApprovalRequestRepo::list_pending_for(&pool, org, ROLE_HR, Some(hr))
        .await
        .unwrap();
    assert!(pending.is_empty());

    // can_approve is false for terminal requests, even for an admin.
    let admin = seed_employee(&pool, org, "Alex Admin", ROLE_ADMIN, None).await;
    let allowed = ApprovalEngine::can_approve(&pool, request_id, &actor(org, admin, ROLE_ADMIN))
        .await
        .unwrap();
    assert!(!allowed);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pending_filter_tracks_the_current_step_role(pool: PgPool) {
    let org = seed_org(&pool, "acme").await;
    let requester = seed_employee(&pool, org, "Riley Requester", "employee", None).await;
    let hr = seed_employee(&pool, org, "Harper HR", ROLE_HR, None).await;
    let boss = seed_employee(&pool, org, "Morgan Manager", ROLE_MANAGEMENT, None).await;
    seed_definition(&pool, org, EntityType::Leave, &[(ROLE_HR, true), (ROLE_MANAGEMENT, true)])
        .await;
    let leave = seed_leave(&pool, org, requester).await;
    let request_id = open_request(&pool, org, EntityType::Leave, leave, requester).await;

    // At step 1 only hr sees it.
    let boss_pending = ApprovalRequestRepo::list_pending_for(&pool, org, ROLE_MANAGEMENT, Some(boss))
        .await
        .unwrap();
    assert!(boss_pending.is_empty());

    ApprovalEngine::decide(&pool, request_id, &actor(org, hr, ROLE_HR), OUTCOME_APPROVED, None)
        .await
        .unwrap();

    // At step 2 the queue swaps over to management.
    let hr_pending = ApprovalRequestRepo::list_pending_for(&pool, org, ROLE_HR, Some(hr))
        .await
        .unwrap();
    assert!(hr_pending.is_empty());
    let boss_pending = ApprovalRequestRepo::list_pending_for(&pool, org, ROLE_MANAGEMENT, Some(boss))
        .await
        .unwrap();
    assert_eq!(boss_pending.len(), 1);
}

// ---------------------------------------------------------------------------
// Status lookup and history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_lookup_returns_latest_request_or_none(pool: PgPool) {
    let org = seed_org(&pool, "acme").await;
    let requester = seed_employee(&pool, org, "Riley Requester", "employee", None).await;
    let hr = seed_employee(&pool, org, "Harper HR", ROLE_HR, None).await;
    seed_definition(&pool, org, EntityType::Leave, &[(ROLE_HR, true)]).await;
    let leave = seed_leave(&pool, org, requester).await;

    let absent = ApprovalRequestRepo::find_latest_for_entity(&pool, EntityType::Leave, leave)
        .await
        .unwrap();
    assert!(absent.is_none());

    let first = open_request(&pool, org, EntityType::Leave, leave, requester).await;
    ApprovalEngine::decide(
        &pool,
        first,
        &actor(org, hr, ROLE_HR),
        OUTCOME_REJECTED,
        Some("overlaps the release freeze"),
    )
    .await
    .unwrap();

    // A second request for the same entity supersedes the first in lookups.
    let second = open_request(&pool, org, EntityType::Leave, leave, requester).await;
    let latest = ApprovalRequestRepo::find_latest_for_entity(&pool, EntityType::Leave, leave)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, second);
    assert_eq!(latest.status, STATUS_PENDING);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn history_is_ordered_and_carries_approver_names(pool: PgPool) {
    let org = seed_org(&pool, "acme").await;
    let requester = seed_employee(&pool, org, "Riley Requester", "employee", None).await;
    let hr = seed_employee(&pool, org, "Harper HR", ROLE_HR, None).await;
    let boss = seed_employee(&pool, org, "Morgan Manager", ROLE_MANAGEMENT, None).await;
    seed_definition(&pool, org, EntityType::Leave, &[(ROLE_HR, true), (ROLE_MANAGEMENT, true)])
        .await;
    let leave = seed_leave(&pool, org, requester).await;
    let request_id = open_request(&pool, org, EntityType::Leave, leave, requester).await;

    ApprovalEngine::decide(&pool, request_id, &actor(org, hr, ROLE_HR), OUTCOME_APPROVED, None)
        .await
        .unwrap();
    ApprovalEngine::decide(
        &pool,
        request_id,
        &actor(org, boss, ROLE_MANAGEMENT),
        OUTCOME_REJECTED,
        Some("insufficient budget"),
    )
    .await
    .unwrap();

    let history = ApprovalActionRepo::history_for_entity(&pool, EntityType::Leave, leave)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].approver_name, "Harper HR");
    assert_eq!(history[0].step_number, 1);
    assert_eq!(history[1].approver_name, "Morgan Manager");
    assert_eq!(history[1].outcome, OUTCOME_REJECTED);

    // An entity with no request has an empty history.
    let untouched = seed_leave(&pool, org, requester).await;
    let empty = ApprovalActionRepo::history_for_entity(&pool, EntityType::Leave, untouched)
        .await
        .unwrap();
    assert!(empty.is_empty());
}

// ---------------------------------------------------------------------------
// The probe mirrors the decision path's preconditions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn can_approve_is_false_across_organizations(pool: PgPool) {
    let org_a = seed_org(&pool, "acme").await;
    let org_b = seed_org(&pool, "globex").await;
    let requester = seed_employee(&pool, org_a, "Riley Requester", "employee", None).await;
    let foreign_hr = seed_employee(&pool, org_b, "Harlow HR", ROLE_HR, None).await;
    let foreign_admin = seed_employee(&pool, org_b, "Avery Admin", ROLE_ADMIN, None).await;
    seed_definition(&pool, org_a, EntityType::Leave, &[(ROLE_HR, true)]).await;
    let leave = seed_leave(&pool, org_a, requester).await;
    let request_id = open_request(&pool, org_a, EntityType::Leave, leave, requester).await;

    // A role match (or the admin override) in the wrong organization never
    // authorizes, matching the org-scoped pending filter.
    for a in [actor(org_b, foreign_hr, ROLE_HR), actor(org_b, foreign_admin, ROLE_ADMIN)] {
        let allowed = ApprovalEngine::can_approve(&pool, request_id, &a).await.unwrap();
        assert!(!allowed, "role {} of another org must not approve", a.role);
        let pending =
            ApprovalRequestRepo::list_pending_for(&pool, org_b, &a.role, a.employee_id)
                .await
                .unwrap();
        assert!(pending.is_empty());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn can_approve_is_false_without_a_linked_employee(pool: PgPool) {
    let org = seed_org(&pool, "acme").await;
    let requester = seed_employee(&pool, org, "Riley Requester", "employee", None).await;
    seed_definition(&pool, org, EntityType::Leave, &[(ROLE_HR, true)]).await;
    let leave = seed_leave(&pool, org, requester).await;
    let request_id = open_request(&pool, org, EntityType::Leave, leave, requester).await;

    // The decision path cannot attribute an action without an employee
    // record, so the probe answers false even for an admin account.
    let unlinked_admin = ApprovalActor {
        organization_id: org,
        employee_id: None,
        role: ROLE_ADMIN.to_string(),
    };
    let allowed = ApprovalEngine::can_approve(&pool, request_id, &unlinked_admin)
        .await
        .unwrap();
    assert!(!allowed);
}
