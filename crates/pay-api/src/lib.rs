//! # pay-api
//!
//! HTTP API layer for braintree-checkout-rs.
//!
//! This crate provides:
//! - Axum-based HTTP(S) server
//! - The client token and checkout endpoints
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/client_token` | Client token (plain text) |
//! | POST | `/checkout` | Run a sale |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState, TlsConfig};
