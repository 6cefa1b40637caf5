//! Domain logic for the HR approval workflow engine.
//!
//! This crate is pure: no I/O, no database types. It defines the error
//! taxonomy, the role and status vocabularies, the decision state machine,
//! the authorization predicate, and the per-entity status synchronization
//! policy tables. The `hrflow-db` crate drives these against Postgres.

pub mod approval;
pub mod authz;
pub mod entity;
pub mod error;
pub mod roles;
pub mod sync;
pub mod types;
pub mod workflow;
