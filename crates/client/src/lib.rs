//! Terminal client for the bug tracker API.
//!
//! Layers, from the wire up: [`api`] (HTTP + envelope handling),
//! [`services`] (one call per server operation), [`controllers`] (state
//! owned per concern), [`ui`] (terminal rendering). [`context::AppContext`]
//! wires them together for one session.

pub mod api;
pub mod config;
pub mod context;
pub mod controllers;
pub mod error;
pub mod filters;
pub mod models;
pub mod services;
pub mod session;
pub mod ui;
