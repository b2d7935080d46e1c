//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Email and password authentication for admin users
//! - `insights` - Product performance report for the dashboard

pub mod auth;
pub mod insights;

pub use auth::{AdminAuthError, AdminAuthService};
pub use insights::{FallbackPolicy, InsightsReport, InteractionTally, build_report};
