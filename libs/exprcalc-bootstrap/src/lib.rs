//! Process bootstrap for the expression calculator server.
//!
//! - [`config`]: layered configuration (defaults, YAML, `APP__` env, CLI)
//! - [`logging`]: `tracing` subscriber setup
//! - [`paths`]: home directory resolution
//! - [`signals`]: shutdown signal handling

pub mod config;
pub mod logging;
pub mod paths;
pub mod signals;

pub use config::{AppConfig, CliArgs, LogFormat, LoggingConfig, ServerConfig};
pub use logging::init_logging;
pub use paths::{HomeDirError, expand_tilde, resolve_home_dir};
pub use signals::{cancel_on_shutdown, wait_for_shutdown};
