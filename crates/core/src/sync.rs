//! Entity status synchronization policy tables.
//!
//! Each entity type owns its own status vocabulary; its consumers were never
//! written to know about generic workflow steps. The engine translates
//! workflow progress into that vocabulary through one pure lookup per entity
//! type, keyed on the step a decision was taken at, the outcome, and the
//! resulting request state. The tables are total: definitions are data, so an
//! organization may configure more steps than an entity has named stages, and
//! surplus intermediate steps map onto the last named intermediate label.

use crate::approval::{STATUS_APPROVED, STATUS_REJECTED};
use crate::entity::EntityType;

// Leave request vocabulary.
pub const LEAVE_PENDING: &str = "pending_approval";
pub const LEAVE_APPROVED: &str = "approved";
pub const LEAVE_REJECTED: &str = "rejected";

// Per-diem claim vocabulary.
pub const PER_DIEM_SUBMITTED: &str = "submitted";
pub const PER_DIEM_UNDER_REVIEW: &str = "under_finance_review";
pub const PER_DIEM_APPROVED: &str = "approved_for_payment";
pub const PER_DIEM_REJECTED: &str = "rejected";

// Payroll run vocabulary: a three-stage chain (review, reconciliation,
// final approval), with each stage's rejection distinguishable.
pub const PAYROLL_PENDING_REVIEW: &str = "pending_review";
pub const PAYROLL_UNDER_RECONCILIATION: &str = "under_reconciliation";
pub const PAYROLL_AWAITING_FINAL: &str = "awaiting_final_approval";
pub const PAYROLL_PAYABLE: &str = "payable";
pub const PAYROLL_REJECTED_REVIEW: &str = "rejected_in_review";
pub const PAYROLL_REJECTED_RECONCILIATION: &str = "rejected_in_reconciliation";
pub const PAYROLL_REJECTED_FINAL: &str = "rejected_at_final_approval";

// Promotion request vocabulary.
pub const PROMOTION_PENDING_MANAGER: &str = "pending_manager_review";
pub const PROMOTION_PENDING_COMMITTEE: &str = "pending_committee_review";
pub const PROMOTION_APPROVED: &str = "approved";
pub const PROMOTION_REJECTED_MANAGER: &str = "rejected_by_manager";
pub const PROMOTION_REJECTED_COMMITTEE: &str = "rejected_by_committee";

/// The facts of one decision, as seen by the synchronizer.
#[derive(Debug, Clone, Copy)]
pub struct DecisionSync<'a> {
    /// The step the decision was recorded at.
    pub step_at_decision: i32,
    /// `approved` or `rejected`.
    pub outcome: &'a str,
    /// The request's status after the decision.
    pub new_status: &'a str,
    /// The request's current step after the decision.
    pub new_step: i32,
}

/// Entity status written when a request is opened at step 1.
pub fn status_on_open(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Leave => LEAVE_PENDING,
        EntityType::PerDiem => PER_DIEM_SUBMITTED,
        EntityType::Payroll => PAYROLL_PENDING_REVIEW,
        EntityType::Promotion => PROMOTION_PENDING_MANAGER,
    }
}

/// Entity status written after a decision.
pub fn status_on_decision(entity_type: EntityType, d: &DecisionSync<'_>) -> &'static str {
    debug_assert!(crate::approval::validate_outcome(d.outcome).is_ok());
    match entity_type {
        EntityType::Leave => {
            if d.new_status == STATUS_REJECTED {
                LEAVE_REJECTED
            } else if d.new_status == STATUS_APPROVED {
                LEAVE_APPROVED
            } else {
                LEAVE_PENDING
            }
        }
        EntityType::PerDiem => {
            if d.new_status == STATUS_REJECTED {
                PER_DIEM_REJECTED
            } else if d.new_status == STATUS_APPROVED {
                PER_DIEM_APPROVED
            } else {
                PER_DIEM_UNDER_REVIEW
            }
        }
        EntityType::Payroll => {
            if d.new_status == STATUS_REJECTED {
                match d.step_at_decision {
                    1 => PAYROLL_REJECTED_REVIEW,
                    2 => PAYROLL_REJECTED_RECONCILIATION,
                    _ => PAYROLL_REJECTED_FINAL,
                }
            } else if d.new_status == STATUS_APPROVED {
                PAYROLL_PAYABLE
            } else {
                match d.new_step {
                    2 => PAYROLL_UNDER_RECONCILIATION,
                    _ => PAYROLL_AWAITING_FINAL,
                }
            }
        }
        EntityType::Promotion => {
            if d.new_status == STATUS_REJECTED {
                match d.step_at_decision {
                    1 => PROMOTION_REJECTED_MANAGER,
                    _ => PROMOTION_REJECTED_COMMITTEE,
                }
            } else if d.new_status == STATUS_APPROVED {
                PROMOTION_APPROVED
            } else {
                PROMOTION_PENDING_COMMITTEE
            }
        }
    }
}
