//! Bug tracker API server library.
//!
//! Exposes config, state, error handling and the router builder so the
//! binary entrypoint and integration tests share one middleware stack.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
