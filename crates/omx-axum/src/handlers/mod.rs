//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin wrappers over the core engine.

pub mod export;
pub mod fetch;
pub mod health;
