//! State Management
//!
//! Global alert and loading state shared across pages.

pub mod global;

pub use global::{provide_global_state, GlobalState};
