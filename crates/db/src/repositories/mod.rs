//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async read methods that
//! accept `&PgPool` as the first argument. Writes that must be atomic across
//! tables live in [`crate::engine`].

pub mod approval_action_repo;
pub mod approval_request_repo;
pub mod employee_repo;
pub mod entity_status_repo;
pub mod workflow_definition_repo;

pub use approval_action_repo::ApprovalActionRepo;
pub use approval_request_repo::ApprovalRequestRepo;
pub use employee_repo::EmployeeRepo;
pub use entity_status_repo::EntityStatusRepo;
pub use workflow_definition_repo::WorkflowDefinitionRepo;
