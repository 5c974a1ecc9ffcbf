//! Stateless repository structs, one per table group.
//!
//! Repositories take a `&PgPool` (or transaction) per call and return
//! `sqlx::Error`; classification into HTTP responses happens in the api
//! crate.

pub mod destination_repo;
pub mod prediction_repo;
pub mod rule_repo;
pub mod sale_repo;
pub mod session_repo;
pub mod upload_repo;
pub mod user_repo;

pub use destination_repo::DestinationRepo;
pub use prediction_repo::PredictionRepo;
pub use rule_repo::RuleRepo;
pub use sale_repo::SaleRepo;
pub use session_repo::SessionRepo;
pub use upload_repo::UploadRepo;
pub use user_repo::UserRepo;
