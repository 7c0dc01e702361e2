use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::request_id::{MakeRequestId, RequestId};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id as seen by handlers, taken from the `x-request-id` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XRequestId(pub String);

#[must_use]
pub fn header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Generates ids for requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&nanoid::nanoid!())
            .ok()
            .map(RequestId::new)
    }
}

/// Record the request id into the current span and the request extensions.
pub async fn push_req_id_to_extensions(mut req: Request, next: Next) -> Response {
    let rid = req
        .headers()
        .get(header())
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);

    if let Some(rid) = rid {
        tracing::Span::current().record("request_id", rid.as_str());
        req.extensions_mut().insert(XRequestId(rid));
    }

    next.run(req).await
}
