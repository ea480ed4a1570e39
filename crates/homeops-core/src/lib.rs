//! # homeops-core
//!
//! Shared types for the HomeOps gateway.
//!
//! This crate provides:
//! - The immutable configuration snapshot loaded once at startup
//! - The normalized result model returned by every adapter
//! - The gateway error taxonomy with stable, caller-facing kinds
//!
//! It deliberately has no HTTP or async dependencies; the server and
//! adapter crates build on top of it.

pub mod config;
pub mod error;
pub mod model;

pub use config::{ConfigError, DockerConfig, EmbyConfig, GatewayConfig};
pub use error::GatewayError;
pub use model::{
    ActionAck, ContainerStats, ContainerSummary, MediaItem, NormalizedResult, Payload, Provenance,
    ResourceKind, SessionSummary,
};
