use std::sync::Arc;

use calculator_sdk::{CalculatorError, Evaluation};
use tracing::{debug, instrument, warn};

use super::evaluator::{BuiltinEvaluator, Evaluator, EvaluatorError};
use super::format::format_value;

impl From<EvaluatorError> for CalculatorError {
    fn from(err: EvaluatorError) -> Self {
        match err {
            EvaluatorError::Parse(e) => Self::Syntax {
                reason: e.to_string(),
            },
            EvaluatorError::Evaluation(e) => Self::Evaluation {
                reason: e.to_string(),
            },
        }
    }
}

/// Calculator domain service.
///
/// Validates the raw expression, delegates to the configured [`Evaluator`]
/// and formats the result. Holds no mutable state.
#[derive(Clone)]
pub struct Service {
    evaluator: Arc<dyn Evaluator>,
}

impl Default for Service {
    fn default() -> Self {
        Self::new(Arc::new(BuiltinEvaluator))
    }
}

impl Service {
    #[must_use]
    pub fn new(evaluator: Arc<dyn Evaluator>) -> Self {
        Self { evaluator }
    }

    /// Evaluate a raw request expression.
    ///
    /// # Errors
    /// - `CalculatorError::EmptyExpression` if `expression` is absent or blank
    /// - `CalculatorError::Syntax` if it does not parse
    /// - `CalculatorError::Evaluation` if it cannot be evaluated to a finite number
    #[instrument(skip(self), level = "debug")]
    pub fn evaluate(&self, expression: Option<&str>) -> Result<Evaluation, CalculatorError> {
        let text = expression.map(str::trim).unwrap_or_default();
        if text.is_empty() {
            debug!("Rejecting empty expression");
            return Err(CalculatorError::EmptyExpression);
        }

        match self.evaluator.evaluate(text) {
            Ok(value) => {
                let formatted = format_value(value);
                debug!(result = %formatted, "Expression evaluated");
                Ok(Evaluation { value, formatted })
            }
            Err(err @ EvaluatorError::Parse(_)) => {
                debug!(error = %err, "Expression rejected");
                Err(err.into())
            }
            Err(err @ EvaluatorError::Evaluation(_)) => {
                warn!(error = %err, "Expression evaluation failed");
                Err(err.into())
            }
        }
    }
}
