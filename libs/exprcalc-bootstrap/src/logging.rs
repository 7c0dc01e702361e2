//! Logging setup.
//!
//! Console output goes to stderr so that stdout stays clean for
//! `--print-config` and `check`. An optional log file is written through a
//! daily rolling, non-blocking appender.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};
use crate::paths::resolve_under;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the file writer alive; drop it last to flush buffered lines.
#[must_use = "dropping the guard stops the log file writer"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Console filter: `RUST_LOG` when set, the configured level otherwise.
fn console_filter(cfg: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&cfg.console_level)
        .with_context(|| format!("invalid logging.console_level '{}'", cfg.console_level))
}

/// Directory and file name of the log file.
fn log_file_location(file: &str, home_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let path = resolve_under(home_dir, file);
    let name = path
        .file_name()
        .map(PathBuf::from)
        .with_context(|| format!("logging.file '{file}' has no file name"))?;
    let dir = path
        .parent()
        .map_or_else(|| home_dir.to_path_buf(), Path::to_path_buf);
    Ok((dir, name))
}

fn console_layer(cfg: &LoggingConfig) -> Result<BoxedLayer> {
    let filter = console_filter(cfg)?;
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
    Ok(match cfg.format {
        LogFormat::Text => layer.with_filter(filter).boxed(),
        LogFormat::Json => layer.json().with_filter(filter).boxed(),
    })
}

fn file_layer(cfg: &LoggingConfig, home_dir: &Path) -> Result<Option<(BoxedLayer, WorkerGuard)>> {
    let Some(file) = cfg.file.as_deref() else {
        return Ok(None);
    };

    let (dir, name) = log_file_location(file, home_dir)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let filter = EnvFilter::try_new(&cfg.file_level)
        .with_context(|| format!("invalid logging.file_level '{}'", cfg.file_level))?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));

    let layer = fmt::layer().with_ansi(false).with_writer(writer);
    let layer = match cfg.format {
        LogFormat::Text => layer.with_filter(filter).boxed(),
        LogFormat::Json => layer.json().with_filter(filter).boxed(),
    };
    Ok(Some((layer, guard)))
}

/// Install the global `tracing` subscriber.
///
/// # Errors
/// Returns an error on invalid filter directives, an unusable log file path,
/// or when a global subscriber is already installed.
pub fn init_logging(cfg: &LoggingConfig, home_dir: &Path) -> Result<LoggingGuard> {
    let mut layers: Vec<BoxedLayer> = vec![console_layer(cfg)?];
    let mut file_guard = None;

    if let Some((layer, guard)) = file_layer(cfg, home_dir)? {
        layers.push(layer);
        file_guard = Some(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(LoggingGuard { _file: file_guard })
}
