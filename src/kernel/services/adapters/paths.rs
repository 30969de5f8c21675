//! Per-user directories for zroot's own files.
//!
//! Settings live under the user cache dir and logs under the user data dir,
//! following the platform conventions (XDG on Linux and other unixes,
//! `~/Library` on macOS, `%APPDATA%` / `%LOCALAPPDATA%` on Windows).

use std::path::PathBuf;

const APP_NAME: &str = "zroot";
const LOG_DIR: &str = "logs";

/// Value of `key` as a path, ignoring unset and empty variables.
fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn home() -> Option<PathBuf> {
    env_path("HOME")
}

fn data_home() -> Option<PathBuf> {
    if cfg!(windows) {
        env_path("APPDATA")
    } else if cfg!(target_os = "macos") {
        home().map(|home| home.join("Library").join("Application Support"))
    } else {
        env_path("XDG_DATA_HOME").or_else(|| home().map(|home| home.join(".local").join("share")))
    }
}

/// User cache directory. The settings file sits in `.zroot/` below it.
pub fn get_cache_dir() -> Option<PathBuf> {
    if cfg!(windows) {
        env_path("LOCALAPPDATA").or_else(|| env_path("APPDATA"))
    } else if cfg!(target_os = "macos") {
        home().map(|home| home.join("Library").join("Caches"))
    } else {
        env_path("XDG_CACHE_HOME").or_else(|| home().map(|home| home.join(".cache")))
    }
}

/// Where the rolling log files go.
pub fn get_log_dir() -> Option<PathBuf> {
    data_home().map(|dir| dir.join(APP_NAME).join(LOG_DIR))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no user data directory to hold zroot logs",
        )
    })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(all(test, unix, not(target_os = "macos")))]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
