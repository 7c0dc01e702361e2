use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::{ApiGatewayConfig, CorsConfig};

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

/// Build a CORS layer from config.
///
/// Entries that do not parse as origins, methods or header names are skipped.
/// Expects a config that passed [`ApiGatewayConfig::validate`].
#[must_use]
pub fn build_cors_layer(cfg: &ApiGatewayConfig) -> CorsLayer {
    let cors: CorsConfig = cfg.cors.clone().unwrap_or_default();
    let mut layer = CorsLayer::new();

    if is_wildcard(&cors.allowed_origins) {
        warn!("CORS allows any origin; list explicit origins for production deployments");
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        if !origins.is_empty() {
            layer = layer.allow_origin(origins);
        }
    }

    if is_wildcard(&cors.allowed_methods) {
        layer = layer.allow_methods(Any);
    } else {
        let methods: Vec<Method> = cors
            .allowed_methods
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !methods.is_empty() {
            layer = layer.allow_methods(methods);
        }
    }

    if is_wildcard(&cors.allowed_headers) {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = cors
            .allowed_headers
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !headers.is_empty() {
            layer = layer.allow_headers(headers);
        }
    }

    if cors.allow_credentials {
        layer = layer.allow_credentials(true);
    }

    if cors.max_age_seconds > 0 {
        layer = layer.max_age(std::time::Duration::from_secs(cors.max_age_seconds));
    }

    layer
}
