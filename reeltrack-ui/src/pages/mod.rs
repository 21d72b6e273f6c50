//! Pages
//!
//! Top-level page components for each route.

pub mod dashboard;
pub mod tracker;

pub use dashboard::Dashboard;
pub use tracker::Tracker;
