//! Calculator SDK
//!
//! This crate provides everything needed to consume the calculator service:
//! - API trait (`CalculatorClient`)
//! - Evaluation result (`Evaluation`)
//! - Error taxonomy (`CalculatorError`, `ErrorKind`)
//!
//! ## Usage
//!
//! ```ignore
//! use calculator_sdk::{CalculatorClient, CalculatorError};
//!
//! let client: Arc<dyn CalculatorClient> = /* wired by the host */;
//! match client.evaluate(Some("55/2")).await {
//!     Ok(evaluation) => println!("{}", evaluation.formatted),
//!     Err(e) => eprintln!("{} ({:?})", e, e.kind()),
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === API TRAIT AND TYPES ===
mod api;
pub use api::{CalculatorClient, CalculatorError, ErrorKind, Evaluation};

/// Client-facing message for a missing or blank expression.
pub const EMPTY_EXPRESSION_MESSAGE: &str = "The expression cannot be empty.";

/// Client-facing message for a malformed expression.
pub const SYNTAX_ERROR_MESSAGE: &str = "Syntax error in the expression.";

/// Client-facing message for any other evaluation failure.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";
