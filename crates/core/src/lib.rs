//! Domain types and rules for the gigboard marketplace.
//!
//! This crate is deliberately free of I/O: it defines the error taxonomy,
//! the role and lifecycle state machines, and the shared ID/timestamp
//! aliases used by the db and api crates.

pub mod error;
pub mod lifecycle;
pub mod notifications;
pub mod roles;
pub mod types;
pub mod workflow;
