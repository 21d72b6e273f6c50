//! # reeltrack
//!
//! Reels session tracker client. A user starts a session, watches Reels, and
//! ends it; the number of reels is estimated from elapsed time and sent to a
//! tracking backend, which owns all storage and aggregation. A dashboard
//! shows the backend's daily/weekly/monthly summaries and streaks.
//!
//! ## Modules
//!
//! Always available (also compiled into the web front end):
//!
//! - [`model`]: wire types for sessions, summaries and streaks
//! - [`estimate`]: seconds-per-reel rate and the reels estimate
//! - [`prefs`]: rate persistence behind a key/value store
//! - [`tracker`]: the tracker state machine
//! - [`stats`]: pure dashboard derivations
//! - [`client`]: error taxonomy and endpoint paths
//!
//! With the default `native` feature:
//!
//! - [`client::ReelsClient`]: reqwest client for the backend
//! - [`tracker::Tracker`]: state machine bound to a backend
//! - [`dashboard`]: concurrent dashboard fetch
//! - [`config`], [`logging`]: TOML config and tracing setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reeltrack::client::{ClientConfig, ReelsClient};
//! use reeltrack::estimate::SecondsPerReel;
//! use reeltrack::tracker::Tracker;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ReelsClient::new(ClientConfig::default())?;
//!     let mut tracker = Tracker::new(client, SecondsPerReel::default());
//!
//!     // Pick up a session left running earlier
//!     tracker.restore().await;
//!
//!     if tracker.state().can_start() {
//!         tracker.start().await?;
//!     }
//!
//!     let ended = tracker.end(None, chrono::Utc::now()).await?;
//!     println!("Saved {:?} reels", ended.reels_watched);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod estimate;
pub mod model;
pub mod prefs;
pub mod stats;
pub mod tracker;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod dashboard;
#[cfg(feature = "native")]
pub mod logging;

// Re-export top-level types for convenience
pub use client::{ClientError, ClientResult};
pub use estimate::{estimate_reels, Estimate, SecondsPerReel};
pub use model::{
    DailySummary, EndSessionRequest, MonthlySummary, Mood, Session, StartSessionRequest, Streaks,
    SummaryList, WeeklySummary,
};
pub use prefs::{load_rate, save_rate, MemoryStore, PreferenceError, PreferenceStore};
pub use stats::{DashboardData, DashboardStats};
pub use tracker::TrackerState;

#[cfg(feature = "native")]
pub use client::{ClientConfig, ReelsClient, TrackerBackend};
#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
#[cfg(feature = "native")]
pub use prefs::FileStore;
#[cfg(feature = "native")]
pub use tracker::{StartOutcome, Tracker, TrackerError};
