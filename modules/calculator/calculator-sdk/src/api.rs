//! Calculator API trait and types
//!
//! Contract trait and types for the calculator service.

use async_trait::async_trait;

use crate::{EMPTY_EXPRESSION_MESSAGE, SYNTAX_ERROR_MESSAGE, UNEXPECTED_ERROR_MESSAGE};

/// Calculator API trait
///
/// Evaluates a single arithmetic expression. Every call is independent;
/// implementations hold no per-request state.
#[async_trait]
pub trait CalculatorClient: Send + Sync {
    /// Evaluate `expression` and return the value together with its
    /// client-facing text.
    ///
    /// `None` stands for an absent request parameter.
    ///
    /// # Errors
    /// - `CalculatorError::EmptyExpression` for absent or blank input
    /// - `CalculatorError::Syntax` when the expression is malformed
    /// - `CalculatorError::Evaluation` when it has no finite value
    async fn evaluate(&self, expression: Option<&str>) -> Result<Evaluation, CalculatorError>;
}

/// Successful evaluation of an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Finite numeric result
    pub value: f64,
    /// Text returned to the caller (`110`, `27.5`, ...)
    pub formatted: String,
}

/// Error type for Calculator operations
///
/// The `Display` text of every variant is the exact message returned to
/// clients. The `reason` fields carry the diagnostic detail for logs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    /// The expression was absent, empty or whitespace only.
    #[error("{}", EMPTY_EXPRESSION_MESSAGE)]
    EmptyExpression,

    /// The expression could not be parsed.
    #[error("{}", SYNTAX_ERROR_MESSAGE)]
    Syntax { reason: String },

    /// The expression parsed but could not be evaluated.
    #[error("{}", UNEXPECTED_ERROR_MESSAGE)]
    Evaluation { reason: String },
}

/// Coarse classification of a [`CalculatorError`].
///
/// `Validation` and `Syntax` are faults in the caller's input, `Evaluation`
/// is a fault on the service side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Syntax,
    Evaluation,
}

impl CalculatorError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyExpression => ErrorKind::Validation,
            Self::Syntax { .. } => ErrorKind::Syntax,
            Self::Evaluation { .. } => ErrorKind::Evaluation,
        }
    }

    /// Diagnostic detail, if any. Never shown to clients.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::EmptyExpression => None,
            Self::Syntax { reason } | Self::Evaluation { reason } => Some(reason),
        }
    }

    /// Whether the fault lies with the caller's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation | ErrorKind::Syntax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_client_message() {
        assert_eq!(
            CalculatorError::EmptyExpression.to_string(),
            "The expression cannot be empty."
        );
        assert_eq!(
            CalculatorError::Syntax {
                reason: "unexpected end of input".to_owned()
            }
            .to_string(),
            "Syntax error in the expression."
        );
        assert_eq!(
            CalculatorError::Evaluation {
                reason: "division by zero".to_owned()
            }
            .to_string(),
            "An unexpected error occurred."
        );
    }

    #[test]
    fn reason_is_kept_out_of_display() {
        let err = CalculatorError::Syntax {
            reason: "unknown identifier 'x'".to_owned(),
        };
        assert!(!err.to_string().contains('x'));
        assert_eq!(err.reason(), Some("unknown identifier 'x'"));
        assert_eq!(CalculatorError::EmptyExpression.reason(), None);
    }

    #[test]
    fn kinds_split_client_and_service_faults() {
        assert!(CalculatorError::EmptyExpression.is_client_error());
        assert!(
            CalculatorError::Syntax {
                reason: String::new()
            }
            .is_client_error()
        );
        let eval = CalculatorError::Evaluation {
            reason: String::new(),
        };
        assert_eq!(eval.kind(), ErrorKind::Evaluation);
        assert!(!eval.is_client_error());
    }
}
