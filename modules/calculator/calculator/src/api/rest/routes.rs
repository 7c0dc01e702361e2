use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use super::handlers;
use crate::domain::service::Service;

/// Path of the evaluation endpoint, relative to the gateway base path.
pub const CALCULATE_PATH: &str = "/calculate";

/// Register the calculator routes on `router`.
///
/// # Errors
/// Returns an error if route registration fails.
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let router = router
        .route(CALCULATE_PATH, get(handlers::calculate))
        .layer(Extension(service));
    tracing::debug!(path = CALCULATE_PATH, "Calculator REST routes registered");
    Ok(router)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        register_routes(Router::new(), Arc::new(Service::default())).unwrap()
    }

    async fn get_text(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn evaluates_expressions() {
        assert_eq!(
            get_text("/calculate?expression=10*11").await,
            (StatusCode::OK, "110".to_owned())
        );
        assert_eq!(
            get_text("/calculate?expression=55%2F2").await,
            (StatusCode::OK, "27.5".to_owned())
        );
        assert_eq!(
            get_text("/calculate?expression=2%2B3").await,
            (StatusCode::OK, "5".to_owned())
        );
    }

    #[tokio::test]
    async fn responds_with_plain_text() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/calculate?expression=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        assert_eq!(content_type, Some("text/plain; charset=utf-8"));
    }

    #[tokio::test]
    async fn rejects_empty_expressions() {
        for uri in [
            "/calculate",
            "/calculate?expression=",
            "/calculate?expression=%20%20",
        ] {
            assert_eq!(
                get_text(uri).await,
                (
                    StatusCode::BAD_REQUEST,
                    "The expression cannot be empty.".to_owned()
                ),
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn rejects_syntax_errors() {
        for expression in ["2%2B", "(1%2B2", "1%202", "foo(1)", "1+1"] {
            let uri = format!("/calculate?expression={expression}");
            assert_eq!(
                get_text(&uri).await,
                (
                    StatusCode::BAD_REQUEST,
                    "Syntax error in the expression.".to_owned()
                ),
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn evaluation_failures_are_server_errors() {
        for expression in ["1%2F0", "sqrt(-1)", "10%5E400"] {
            let uri = format!("/calculate?expression={expression}");
            assert_eq!(
                get_text(&uri).await,
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_owned()
                ),
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn same_request_same_response() {
        let first = get_text("/calculate?expression=1%2F3").await;
        let second = get_text("/calculate?expression=1%2F3").await;
        assert_eq!(first, second);
        assert_eq!(first.0, StatusCode::OK);
    }

    #[tokio::test]
    async fn only_get_is_routed() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate?expression=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
