//! Authentication primitives: JWT validation and token claims.
//!
//! Token issuance and credential storage live in an external identity
//! service; this crate only validates incoming Bearer tokens.

pub mod jwt;
