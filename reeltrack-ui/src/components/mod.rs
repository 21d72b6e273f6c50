//! UI Components
//!
//! Reusable Leptos components for the tracker and dashboard.

pub mod nav;
pub mod chart;
pub mod stats_card;
pub mod end_session_modal;
pub mod loading;
pub mod toast;

pub use nav::Nav;
pub use chart::{DailyChart, DailySeries};
pub use stats_card::StatsCard;
pub use end_session_modal::EndSessionModal;
pub use loading::{CardSkeleton, Loading};
pub use toast::Toast;
