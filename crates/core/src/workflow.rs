//! Workflow definition step logic.
//!
//! A definition is an ordered list of role-gated steps, captured by a request
//! at creation time. When no active definition exists for an (organization,
//! entity type) pair the engine falls back to [`implicit_steps`], an implicit
//! one-step policy -- absence of a definition never means "skip approval".

use serde::{Deserialize, Serialize};

use crate::roles::{validate_step_role, STEP_ROLE_LINE_MANAGER};

/// One approval step of a workflow definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpec {
    /// 1-based position in the chain.
    pub order: i32,
    /// Role gating this step (a static role or `line_manager`).
    pub role: String,
    /// Optional steps are skipped when computing terminal approval.
    pub required: bool,
}

/// The implicit single-step policy used when no definition is active:
/// one required step decided by the requester's line manager.
pub fn implicit_steps() -> Vec<StepSpec> {
    vec![StepSpec {
        order: 1,
        role: STEP_ROLE_LINE_MANAGER.to_string(),
        required: true,
    }]
}

/// Whether any required step remains after `current_step`.
pub fn has_remaining_required(steps: &[StepSpec], current_step: i32) -> bool {
    steps.iter().any(|s| s.order > current_step && s.required)
}

/// The step at a given order, if the definition has one.
pub fn step_at(steps: &[StepSpec], order: i32) -> Option<&StepSpec> {
    steps.iter().find(|s| s.order == order)
}

/// Validate a definition's step list before it is persisted.
///
/// Steps must be non-empty, numbered contiguously from 1, gated on
/// assignable roles, and contain at least one required step.
pub fn validate_steps(steps: &[StepSpec]) -> Result<(), String> {
    if steps.is_empty() {
        return Err("A workflow definition must have at least one step".to_string());
    }

    let mut orders: Vec<i32> = steps.iter().map(|s| s.order).collect();
    orders.sort_unstable();
    for (i, order) in orders.iter().enumerate() {
        let expected = i as i32 + 1;
        if *order != expected {
            return Err(format!(
                "Step orders must be contiguous from 1; expected {expected}, got {order}"
            ));
        }
    }

    for step in steps {
        validate_step_role(&step.role)?;
    }

    if !steps.iter().any(|s| s.required) {
        return Err("A workflow definition must have at least one required step".to_string());
    }

    Ok(())
}
