//! The seam between the service and the expression engine.

use super::expr::{EvaluationError, Expression, ParseError};

/// Failure of an [`Evaluator`], split by the stage that failed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluatorError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// Builds and evaluates arithmetic expressions.
///
/// Implementations must be stateless across calls: the same text always
/// yields the same result.
pub trait Evaluator: Send + Sync {
    /// Evaluate `text` to a finite number.
    ///
    /// # Errors
    /// `EvaluatorError::Parse` when `text` is malformed,
    /// `EvaluatorError::Evaluation` when it cannot be evaluated.
    fn evaluate(&self, text: &str) -> Result<f64, EvaluatorError>;
}

/// The built-in engine from [`super::expr`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinEvaluator;

impl Evaluator for BuiltinEvaluator {
    fn evaluate(&self, text: &str) -> Result<f64, EvaluatorError> {
        let expression = Expression::build(text)?;
        Ok(expression.evaluate()?)
    }
}
