//! Approval request status and outcome vocabularies, plus the decision
//! state machine.
//!
//! A request moves `pending(step k) -> pending(step k+1) -> ... -> approved`,
//! with a direct edge from any pending step to `rejected`. Cancellation is a
//! separate operation, reachable only from `pending`. All three of
//! `approved`, `rejected`, `cancelled` are terminal.

/// Request is awaiting a decision at its current step.
pub const STATUS_PENDING: &str = "pending";

/// Every required step was approved. Terminal.
pub const STATUS_APPROVED: &str = "approved";

/// Some step rejected the request. Terminal.
pub const STATUS_REJECTED: &str = "rejected";

/// The requester withdrew the request. Terminal.
pub const STATUS_CANCELLED: &str = "cancelled";

/// A single decision approved the current step.
pub const OUTCOME_APPROVED: &str = "approved";

/// A single decision rejected the request.
pub const OUTCOME_REJECTED: &str = "rejected";

/// All valid decision outcomes.
pub const VALID_OUTCOMES: &[&str] = &[OUTCOME_APPROVED, OUTCOME_REJECTED];

/// The result of applying one decision to a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The request's new overall status.
    pub status: &'static str,
    /// The request's new current step.
    pub step: i32,
}

/// Validate that an outcome string is one of the accepted values.
pub fn validate_outcome(outcome: &str) -> Result<(), String> {
    if VALID_OUTCOMES.contains(&outcome) {
        Ok(())
    } else {
        Err(format!(
            "Invalid outcome '{outcome}'. Must be one of: {}",
            VALID_OUTCOMES.join(", ")
        ))
    }
}

/// Validate that a rejection carries a comment.
///
/// Comments are a hard precondition for rejections, not a UI nicety: the
/// audit trail must record why a request was turned down.
pub fn validate_rejection_comments(outcome: &str, comments: Option<&str>) -> Result<(), String> {
    if outcome == OUTCOME_REJECTED && comments.map_or(true, |c| c.trim().is_empty()) {
        return Err("A rejection must include comments".to_string());
    }
    Ok(())
}

/// Compute the state a pending request moves to after one decision.
///
/// `has_remaining_required` is whether the workflow definition contains any
/// required step with order greater than `current_step`. The caller is
/// responsible for having verified that the request is still pending and the
/// outcome is valid.
///
/// - rejected: terminal `rejected`, step unchanged.
/// - approved with required steps remaining: still `pending`, step advances
///   by one.
/// - approved with nothing required remaining: terminal `approved`, step
///   unchanged.
pub fn decide(current_step: i32, outcome: &str, has_remaining_required: bool) -> Transition {
    if outcome == OUTCOME_REJECTED {
        return Transition {
            status: STATUS_REJECTED,
            step: current_step,
        };
    }
    if has_remaining_required {
        Transition {
            status: STATUS_PENDING,
            step: current_step + 1,
        }
    } else {
        Transition {
            status: STATUS_APPROVED,
            step: current_step,
        }
    }
}

/// Whether a status is terminal (no outgoing transitions).
pub fn is_terminal(status: &str) -> bool {
    status == STATUS_APPROVED || status == STATUS_REJECTED || status == STATUS_CANCELLED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_outcomes_accepted() {
        assert!(validate_outcome(OUTCOME_APPROVED).is_ok());
        assert!(validate_outcome(OUTCOME_REJECTED).is_ok());
    }

    #[test]
    fn test_invalid_outcome_rejected() {
        let result = validate_outcome("flagged");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid outcome"));
    }

    #[test]
    fn test_rejection_without_comments_fails() {
        assert!(validate_rejection_comments(OUTCOME_REJECTED, None).is_err());
        assert!(validate_rejection_comments(OUTCOME_REJECTED, Some("")).is_err());
        assert!(validate_rejection_comments(OUTCOME_REJECTED, Some("   ")).is_err());
    }

    #[test]
    fn test_rejection_with_comments_passes() {
        assert!(validate_rejection_comments(OUTCOME_REJECTED, Some("insufficient budget")).is_ok());
    }

    #[test]
    fn test_approval_never_requires_comments() {
        assert!(validate_rejection_comments(OUTCOME_APPROVED, None).is_ok());
    }

    #[test]
    fn test_rejection_is_terminal_and_keeps_step() {
        let t = decide(2, OUTCOME_REJECTED, true);
        assert_eq!(t.status, STATUS_REJECTED);
        assert_eq!(t.step, 2);
    }

    #[test]
    fn test_approval_advances_when_required_steps_remain() {
        let t = decide(1, OUTCOME_APPROVED, true);
        assert_eq!(t.status, STATUS_PENDING);
        assert_eq!(t.step, 2);
    }

    #[test]
    fn test_final_approval_is_terminal_and_keeps_step() {
        let t = decide(3, OUTCOME_APPROVED, false);
        assert_eq!(t.status, STATUS_APPROVED);
        assert_eq!(t.step, 3);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(is_terminal(STATUS_APPROVED));
        assert!(is_terminal(STATUS_REJECTED));
        assert!(is_terminal(STATUS_CANCELLED));
        assert!(!is_terminal(STATUS_PENDING));
    }
}
