//! Admin dashboard aggregation.

pub mod service;

pub use service::{DashboardService, DashboardSummary};
