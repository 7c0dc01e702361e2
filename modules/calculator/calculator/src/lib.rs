//! Calculator module
//!
//! Evaluates arithmetic expressions received over HTTP.
//!
//! - `domain::expr`: tokenizer, shunting-yard compiler and stack evaluator
//! - `domain::service`: validation, evaluation and result formatting
//! - `api::rest`: `GET /calculate?expression=...` returning plain text
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![forbid(unsafe_code)]

pub mod api;
pub mod domain;

pub use api::rest::routes::{CALCULATE_PATH, register_routes};
pub use domain::evaluator::{BuiltinEvaluator, Evaluator, EvaluatorError};
pub use domain::format::format_value;
pub use domain::local_client::CalculatorLocalClient;
pub use domain::service::Service;

// Re-export SDK types for convenience
pub use calculator_sdk::{CalculatorClient, CalculatorError, ErrorKind, Evaluation};
