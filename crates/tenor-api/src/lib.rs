//! Tenor-api: HTTP API layer for Tenor
//!
//! Exposes the fixed-rate pricing core to a web front end. Every endpoint is
//! a stateless computation over the request body.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::AppState;
