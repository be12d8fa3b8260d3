//! Per-user directories.

use std::env;
use std::path::PathBuf;

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

/// Platform config root: `%APPDATA%`, `~/Library/Application Support`, or
/// `$XDG_CONFIG_HOME` falling back to `~/.config`.
pub fn user_config() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        env::var_os("APPDATA").map(PathBuf::from)
    } else if cfg!(target_os = "macos") {
        user_home().map(|home| home.join("Library").join("Application Support"))
    } else {
        env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| user_home().map(|home| home.join(".config")))
    }
}

/// `<config root>/<app>/<file>`.
pub fn app_config_file(app: &str, file: &str) -> Option<PathBuf> {
    user_config().map(|dir| dir.join(app).join(file))
}
