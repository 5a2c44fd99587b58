//! Core library surface for the Personal Library Manager TUI.
//!
//! The `bin` target wires these pieces together; the integration tests use
//! the same persistence functions against a live MySQL server.
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod tracing_setup;
pub mod ui;

#[cfg(test)]
mod test_utils;

/// Persistence entry points used by `main.rs` and the integration tests.
pub use db::{ensure_schema, BookRepository, Catalog, ConnectionProvider};

pub use config::DbConfig;
pub use error::LibraryError;
pub use models::{Book, LibraryStats, NewBook, SearchField};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
