//! Layered application configuration.
//!
//! Order of precedence, lowest first:
//! 1. built-in defaults
//! 2. YAML file (`--config`)
//! 3. environment variables prefixed with `APP__`, nested with `__`
//!    (`APP__API_GATEWAY__BIND_ADDR=0.0.0.0:8080`)
//! 4. command line overrides

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use api_gateway::ApiGatewayConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use crate::paths::{DEFAULT_HOME_SUBDIR, resolve_home_dir};

/// Prefix of environment variables that override configuration.
pub const ENV_PREFIX: &str = "APP__";

fn default_home_dir() -> String {
    format!("~/{DEFAULT_HOME_SUBDIR}")
}

fn default_console_level() -> String {
    "info".to_owned()
}

fn default_file_level() -> String {
    "debug".to_owned()
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub api_gateway: ApiGatewayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Working directory for logs and other files; `~` is expanded.
    #[serde(default = "default_home_dir")]
    pub home_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            home_dir: default_home_dir(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Console filter directive (`info`, `debug`, `calculator=trace,info`, ...)
    #[serde(default = "default_console_level")]
    pub console_level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Log file; relative paths are resolved under `server.home_dir`.
    /// Files roll daily and carry a date suffix (`exprcalc.log.2024-01-31`).
    #[serde(default)]
    pub file: Option<String>,

    #[serde(default = "default_file_level")]
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_level: default_console_level(),
            format: LogFormat::default(),
            file: None,
            file_level: default_file_level(),
        }
    }
}

/// Command line values that feed into the configuration.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// YAML file passed with `--config`
    pub config: Option<PathBuf>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
}

/// Console level selected by repeated `-v` flags, if any.
#[must_use]
pub fn level_for_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

impl AppConfig {
    /// Load configuration from defaults, the optional YAML file and the
    /// environment, then normalize `server.home_dir` (creating it) and
    /// validate the gateway section.
    ///
    /// # Errors
    /// Returns an error if the file cannot be parsed, a value has the wrong
    /// type or an unknown key, the home directory cannot be resolved, or the
    /// gateway configuration is invalid.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let mut config: Self = Self::figment(path)
            .extract()
            .context("failed to load configuration")?;
        config.normalize_home_dir()?;
        config.api_gateway.validate()?;
        Ok(config)
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn normalize_home_dir(&mut self) -> Result<()> {
        let home = resolve_home_dir(Some(&self.server.home_dir), DEFAULT_HOME_SUBDIR, true)
            .context("invalid server.home_dir")?;
        self.server.home_dir = home.to_string_lossy().into_owned();
        Ok(())
    }

    /// Apply command line overrides: `--port` replaces the bind port, `-v`
    /// replaces the console log level.
    ///
    /// # Errors
    /// Returns an error if the configured bind address cannot carry a port.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) -> Result<()> {
        if let Some(port) = args.port {
            let mut addr = self.api_gateway.socket_addr()?;
            addr.set_port(port);
            self.api_gateway.bind_addr = addr.to_string();
        }
        if let Some(level) = level_for_verbosity(args.verbose) {
            level.clone_into(&mut self.logging.console_level);
        }
        Ok(())
    }

    /// Render the configuration as YAML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| anyhow::anyhow!("failed to render configuration as YAML: {e}"))
    }
}
