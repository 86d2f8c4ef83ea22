//! Gigboard API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! services, WebSocket infrastructure) so integration tests and the binary
//! entrypoint can both access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notify;
pub mod query;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod ws;
