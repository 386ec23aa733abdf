//! ChurnGuard core: churn-risk scoring, retention recommendations, the
//! prediction cache and the consultation audit trail.

pub mod audit;
pub mod cache;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod portfolio;
pub mod profile;
pub mod recommendation;
pub mod scoring;
pub mod store;
pub mod types;
