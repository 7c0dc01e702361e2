//! Errors raised while building or evaluating an expression.

/// The expression text is malformed.
///
/// Positions are byte offsets into the (trimmed) expression text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("invalid number literal '{literal}' at {position}")]
    InvalidNumber { literal: String, position: usize },

    #[error("unknown function or variable '{name}' at {position}")]
    UnknownIdentifier { name: String, position: usize },

    #[error("function '{name}' at {position} must be followed by '('")]
    MissingCallParenthesis { name: &'static str, position: usize },

    #[error("missing operand at {position}")]
    MissingOperand { position: usize },

    #[error("unexpected number at {position}")]
    AdjacentNumbers { position: usize },

    #[error("separator at {position} is outside of a function call")]
    MisplacedSeparator { position: usize },

    #[error("unbalanced parenthesis at {position}")]
    UnbalancedParenthesis { position: usize },

    #[error("function '{name}' expects {expected} argument(s), got {found}")]
    ArityMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },
}

/// A well-formed expression could not be evaluated to a finite number.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a number")]
    Domain,

    #[error("result is infinite")]
    Overflow,

    #[error("compiled program is malformed")]
    MalformedProgram,
}
