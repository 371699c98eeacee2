//! # promo-api
//!
//! HTTP pricing service and console demo for the campaign engine.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for pricing carts and browsing configured campaigns
//! - The demo scenario and receipt rendering used by `promo-demo`
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/price` | Price a cart |
//! | GET | `/api/v1/campaigns` | List campaigns |
//! | GET | `/api/v1/campaigns/{id}` | Get campaign |

pub mod demo;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
