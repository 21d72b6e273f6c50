//! Reeltrack Web
//!
//! Reels session tracker and usage dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Start/end sessions with a live reels estimate
//! - Adjustable seconds-per-reel rate, kept in localStorage
//! - Daily/weekly/monthly totals and streaks
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the tracking backend over HTTP; all estimation
//! and dashboard math comes from the shared `reeltrack` crate.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
