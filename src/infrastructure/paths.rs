//! Path manipulation utilities.
//!
//! This module provides functions for locating the data and config directories,
//! turning user-supplied paths into the absolute form stored in the database, and
//! checking whether a stored path is currently present on disk.

use crate::domain::{DirRankError, Result};
use std::path::{Component, Path, PathBuf};

/// Application directory name under the platform data/config dirs.
const APP_DIR: &str = "dirrank";

/// Returns the data directory for dirrank storage.
///
/// Resolves to the platform data directory (e.g. `~/.local/share/dirrank` on
/// Linux), or `./.dirrank` when no such directory can be determined.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".dirrank"))
}

/// Returns the default location of the configuration file, if the platform has a
/// config directory.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths that do not start with `~` (or when no home directory is known) are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use dirrank::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let Some(home) = dirs::home_dir() else {
        return path.to_string();
    };

    if path == "~" {
        home.to_string_lossy().into_owned()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest).to_string_lossy().into_owned()
    } else {
        path.to_string()
    }
}

/// Makes `path` absolute against the current directory and lexically resolves
/// `.` and `..` components.
///
/// Symlinks are not followed and the path need not exist.
///
/// # Errors
///
/// Returns an I/O error if `path` is relative and the current directory cannot
/// be determined, or [`DirRankError::NonUtf8Path`] if the result is not valid
/// UTF-8.
pub fn absolutize(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    normalize(&joined)
        .into_os_string()
        .into_string()
        .map_err(|raw| DirRankError::NonUtf8Path(PathBuf::from(raw)))
}

/// Lexically normalizes an absolute path.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root.
                if out.parent().is_some() {
                    out.pop();
                }
            }
        }
    }
    out
}

/// Returns true if `path` currently exists.
///
/// Any failure to determine existence (e.g. permission denied) counts as absent.
#[must_use]
pub fn path_exists(path: &str) -> bool {
    Path::new(path).try_exists().unwrap_or(false)
}
