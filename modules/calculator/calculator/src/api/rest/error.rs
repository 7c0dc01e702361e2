use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use calculator_sdk::{CalculatorError, ErrorKind};

/// HTTP status for each error kind.
#[must_use]
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::Syntax => StatusCode::BAD_REQUEST,
        ErrorKind::Evaluation => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// A [`CalculatorError`] rendered as a plain-text HTTP response.
///
/// The body is the error's client-facing message; the reason stays in the logs.
#[derive(Debug)]
pub struct ApiError(pub CalculatorError);

impl From<CalculatorError> for ApiError {
    fn from(e: CalculatorError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (status_for(self.0.kind()), self.0.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_kinds_to_status_codes() {
        let cases = [
            (CalculatorError::EmptyExpression, StatusCode::BAD_REQUEST),
            (
                CalculatorError::Syntax {
                    reason: String::new(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                CalculatorError::Evaluation {
                    reason: String::new(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).into_response().status(), status);
        }
    }
}
