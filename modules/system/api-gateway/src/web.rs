use axum::Json;
use serde_json::{Value, json};

/// Detailed health check: status and current server time.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Liveness probe.
pub async fn healthz() -> &'static str {
    "ok"
}
