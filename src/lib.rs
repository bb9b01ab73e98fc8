//! Library crate for usrapi-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - Remote collection client and the user record (`api`)
//! - Application state, confirmation gate and update loop (`app`)
//! - Command-line/environment configuration (`config`)
//! - Error types (`error`)
//! - File logging setup (`logging`)
//! - In-memory search helpers (`search`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `usrapi-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod search;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
pub use api::{CollectionClient, HttpCollectionClient, User};
pub use error::{ApiError, DynError};
