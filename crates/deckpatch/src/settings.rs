//! Layered configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use deckpatch_install::Config;
use deckpatch_platform::dir::app_config_file;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tracing::debug;

pub const FILE_NAME: &str = "deckpatch.toml";
const ENV_PREFIX: &str = "DECKPATCH_";

/// `<user config dir>/deckpatch/deckpatch.toml`, when the platform has one.
pub fn user_file() -> Option<PathBuf> {
    app_config_file("deckpatch", FILE_NAME)
}

/// Defaults, then config files, then `DECKPATCH_*` variables.
///
/// An explicit file replaces both the user and working-directory files and
/// must exist. Nested keys use `__` in variable names, e.g.
/// `DECKPATCH_PATCH__TIMEOUT_SECS=0`.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    match explicit {
        Some(path) => {
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }
        None => {
            if let Some(user) = user_file() {
                figment = figment.merge(Toml::file(user));
            }
            figment = figment.merge(Toml::file(FILE_NAME));
        }
    }

    let config: Config = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("invalid configuration")?;
    debug!(?config, "configuration loaded");
    Ok(config)
}
