//! Entity models and DTOs.
//!
//! Each module pairs the `FromRow` row struct with the Create/Update DTOs
//! used by its repository. Joined read models (e.g. a project with its
//! client's profile) are flat row structs with aliased columns.

pub mod application;
pub mod dashboard;
pub mod favorite;
pub mod notification;
pub mod payment;
pub mod profile;
pub mod profile_visit;
pub mod project;
pub mod user;
