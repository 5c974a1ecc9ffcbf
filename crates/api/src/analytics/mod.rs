//! Analytical job engine wiring.
//!
//! [`orchestrator`] composes the pure pipeline stages from
//! `toursight_core::analytics` with the persistence step in [`persist`]
//! and is held in [`AppState`](crate::state::AppState) as an
//! `Arc<AnalyticsOrchestrator>`.

pub mod orchestrator;
pub mod persist;
