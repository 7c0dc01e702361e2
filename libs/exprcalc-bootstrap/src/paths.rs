use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default home directory name under the user's home.
pub const DEFAULT_HOME_SUBDIR: &str = ".exprcalc";

#[derive(Debug, thiserror::Error)]
pub enum HomeDirError {
    #[error("HOME environment variable is not set")]
    HomeMissing,
    #[error("home_dir must be an absolute path (after ~ expansion): {0}")]
    AbsoluteRequired(String),
    #[error("failed to create home_dir {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn user_home() -> Result<PathBuf, HomeDirError> {
    #[cfg(target_os = "windows")]
    let home = env::var("USERPROFILE").or_else(|_| env::var("HOME"));
    #[cfg(not(target_os = "windows"))]
    let home = env::var("HOME");

    home.map(PathBuf::from).map_err(|_| HomeDirError::HomeMissing)
}

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a leading `~` are returned unchanged.
///
/// # Errors
/// Returns `HomeDirError::HomeMissing` when expansion is needed but the home
/// directory is unknown.
pub fn expand_tilde(raw: &str) -> Result<PathBuf, HomeDirError> {
    if raw == "~" {
        return user_home();
    }
    match raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        Some(rest) => Ok(user_home()?.join(rest)),
        None => Ok(PathBuf::from(raw)),
    }
}

/// Resolve the server home directory.
///
/// `config_home` gets `~` expansion and must end up absolute; without it the
/// directory is `<user home>/<default_subdir>`. With `create` the directory is
/// created if missing.
///
/// # Errors
/// Returns `HomeDirError` when the path is relative, the user home is unknown,
/// or the directory cannot be created.
pub fn resolve_home_dir(
    config_home: Option<&str>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf, HomeDirError> {
    let path = match config_home {
        Some(raw) => {
            let expanded = expand_tilde(raw)?;
            if !expanded.is_absolute() {
                return Err(HomeDirError::AbsoluteRequired(
                    expanded.to_string_lossy().into_owned(),
                ));
            }
            expanded
        }
        None => user_home()?.join(default_subdir),
    };

    if create {
        fs::create_dir_all(&path).map_err(|source| HomeDirError::Create {
            path: path.to_string_lossy().into_owned(),
            source,
        })?;
    }
    Ok(path)
}

/// Resolve `path` against `base` unless it is already absolute.
#[must_use]
pub fn resolve_under(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
