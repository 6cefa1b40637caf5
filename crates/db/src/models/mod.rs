//! Database row models and request/response DTOs.

pub mod approval;
pub mod employee;
pub mod workflow;
