//! HTTP handlers, grouped by resource.

pub mod application;
pub mod dashboard;
pub mod favorite;
pub mod notification;
pub mod profile;
pub mod project;
pub mod user;
