pub mod evaluator;
pub mod expr;
pub mod format;
pub mod local_client;
pub mod service;
