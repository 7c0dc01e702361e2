use std::sync::Arc;

use axum::Extension;
use axum::extract::RawQuery;

use super::dto::CalculateQuery;
use super::error::ApiError;
use crate::domain::service::Service;

/// Evaluate the `expression` query parameter and return the result as text.
pub async fn calculate(
    Extension(svc): Extension<Arc<Service>>,
    RawQuery(query): RawQuery,
) -> Result<String, ApiError> {
    let query = CalculateQuery::from_raw(query.as_deref());
    let evaluation = svc.evaluate(query.expression.as_deref())?;
    Ok(evaluation.formatted)
}
