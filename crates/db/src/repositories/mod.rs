//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Plain reads and single-row writes accept `&PgPool`; methods that must
//! participate in a multi-entity transaction accept `&mut PgConnection`
//! so the service layer can run them inside one `BEGIN`/`COMMIT`.

pub mod application_repo;
pub mod dashboard_repo;
pub mod favorite_repo;
pub mod notification_repo;
pub mod payment_repo;
pub mod profile_repo;
pub mod profile_visit_repo;
pub mod project_repo;
pub mod user_repo;

pub use application_repo::ApplicationRepo;
pub use dashboard_repo::DashboardRepo;
pub use favorite_repo::FavoriteRepo;
pub use notification_repo::NotificationRepo;
pub use payment_repo::PaymentRepo;
pub use profile_repo::ProfileRepo;
pub use profile_visit_repo::ProfileVisitRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
