//! HTTP handlers, one module per resource.

pub mod auth;
pub mod dashboard;
pub mod destinations;
pub mod market_basket;
pub mod predictions;
pub mod sales;
pub mod uploads;
