//! # homeops-server
//!
//! HTTP surface of the HomeOps gateway.
//!
//! All `/v1/` routes require a valid `X-API-Key` header; `/health` is
//! the single unauthenticated endpoint so orchestration and monitoring
//! tooling can probe liveness without a secret. Requests flow
//! auth gate -> dispatcher -> adapter; failures map to a stable JSON
//! error envelope.

pub mod actions;
pub mod auth;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use server::GatewayServer;
pub use state::AppState;
