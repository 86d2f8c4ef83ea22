//! Domain services: the project lifecycle engine and the application
//! workflow.
//!
//! Handlers delegate here whenever an operation touches more than one table
//! or carries state-machine rules. Each multi-entity write runs in a single
//! transaction; notification fan-out happens after commit and never affects
//! the outcome.

pub mod applications;
pub mod projects;
