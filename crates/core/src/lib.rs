//! Domain logic for the toursight analytics platform.
//!
//! Pure logic only: no database access and no HTTP. The [`analytics`]
//! module owns the analytical job pipeline up to (but excluding)
//! persistence -- request types, worker invocation building, subprocess
//! supervision, and output decoding.

pub mod analytics;
pub mod error;
pub mod roles;
pub mod types;
