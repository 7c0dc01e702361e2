//! API gateway
//!
//! Hosts module routes behind a shared middleware stack (request id,
//! tracing, timeout, CORS), exposes `/health` and `/healthz`, and runs the
//! HTTP server with graceful shutdown.
#![forbid(unsafe_code)]

pub mod config;
pub mod cors;
pub mod middleware;
mod module;
pub mod web;

pub use config::{ApiGatewayConfig, CorsConfig};
pub use module::ApiGateway;
