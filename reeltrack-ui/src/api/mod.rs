//! Backend access and browser storage

pub mod client;
pub mod storage;

pub use client::*;
pub use storage::LocalStorageStore;
