//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `employees.role`.
//! `line_manager` is not a stored role: it is a dynamic relationship
//! (`employees.manager_id`) resolved at each authorization check, and is
//! only valid as a *step* role in a workflow definition.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_HR: &str = "hr";
pub const ROLE_FINANCE: &str = "finance";
pub const ROLE_MANAGEMENT: &str = "management";
pub const ROLE_EMPLOYEE: &str = "employee";

/// Dynamic step role: the requester's line manager.
pub const STEP_ROLE_LINE_MANAGER: &str = "line_manager";

/// Static roles a workflow step may be gated on.
pub const ASSIGNABLE_STEP_ROLES: &[&str] = &[
    ROLE_HR,
    ROLE_FINANCE,
    ROLE_MANAGEMENT,
    STEP_ROLE_LINE_MANAGER,
];

/// Validate that a role string may be used as a step's approver role.
pub fn validate_step_role(role: &str) -> Result<(), String> {
    if ASSIGNABLE_STEP_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid step role '{role}'. Must be one of: {}",
            ASSIGNABLE_STEP_ROLES.join(", ")
        ))
    }
}
