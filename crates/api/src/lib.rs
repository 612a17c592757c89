//! Carbontune API server library.
//!
//! Exposes config, state, error handling, the region loader and routes so
//! integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod knowledge;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
