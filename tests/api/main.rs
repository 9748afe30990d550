//! HTTP API integration tests.
//!
//! Starts an axum server over an in-memory store and exercises it with reqwest.

#[path = "../support/mod.rs"]
mod support;
mod frontend;
