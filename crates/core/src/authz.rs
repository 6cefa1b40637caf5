//! The role-resolution predicate: who may decide a given step.
//!
//! Role resolution is polymorphic over the fixed role set plus one
//! relationship-based predicate (the requester's line manager). The
//! relationship is never stored on the request; callers resolve it against
//! the employee graph at every check, since it can change after the request
//! is created.

use crate::roles::{ROLE_ADMIN, STEP_ROLE_LINE_MANAGER};

/// Whether an actor may decide a step gated on `step_role`.
///
/// True when the actor's static role matches the step role, when the step is
/// gated on `line_manager` and the actor is the requester's manager, or when
/// the actor holds the organization's `admin` super-role (unconditional
/// override). The caller must separately verify that the request is still
/// pending.
pub fn can_approve(step_role: &str, acting_role: &str, is_line_manager: bool) -> bool {
    if acting_role == ROLE_ADMIN {
        return true;
    }
    if step_role == STEP_ROLE_LINE_MANAGER {
        return is_line_manager;
    }
    acting_role == step_role
}
