//! Stateful controllers. Each owns its data, a [`Phase`] and the last
//! error message, and takes `&mut self` for every mutating call.

pub mod auth;
pub mod bugs;

pub use auth::AuthController;
pub use bugs::BugsController;

use crate::error::ClientError;

/// Request lifecycle of a controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Text shown for a failed call: the server's message when there is one,
/// otherwise the per-operation fallback.
pub fn failure_message(err: &ClientError, fallback: &str) -> String {
    err.server_message().unwrap_or(fallback).to_string()
}
