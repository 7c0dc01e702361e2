use std::sync::Arc;

use calculator_sdk::{CalculatorClient, CalculatorError, Evaluation};

use crate::domain::service::Service;

/// In-process client for the calculator service
pub struct CalculatorLocalClient {
    service: Arc<Service>,
}

impl CalculatorLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait::async_trait]
impl CalculatorClient for CalculatorLocalClient {
    async fn evaluate(&self, expression: Option<&str>) -> Result<Evaluation, CalculatorError> {
        self.service.evaluate(expression)
    }
}
