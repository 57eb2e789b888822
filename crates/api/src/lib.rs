//! MedBoard layout-storage API server library.
//!
//! Serves the widget catalog and stores dashboard layouts in memory.
//! Exposes config, state, error handling and routes so integration tests
//! and the binary entrypoint share the same router.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod repo;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
