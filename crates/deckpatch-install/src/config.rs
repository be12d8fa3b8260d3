use std::path::PathBuf;
use std::time::Duration;

use deckpatch_archive::DEFAULT_INTERNAL_PATH;
use deckpatch_platform::dir::user_home;
use deckpatch_platform::locate::{SteamLocator, default_steam_roots};
use deckpatch_platform::os::OS;
use serde::{Deserialize, Serialize};

/// Complete tool configuration. Every field has a default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game:     GameConfig,
    pub patch:    PatchConfig,
    pub locator:  LocatorConfig,
    pub mods_dir: PathBuf,
    pub download: DownloadConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Binary whose embedded archive receives the images.
    pub exe_name:       String,
    /// Directory name under `steamapps/common`.
    pub folder_name:    String,
    /// Directory under the game root holding the assets snapshot.
    pub backup_dirname: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            exe_name:       "Balatro.exe".to_string(),
            folder_name:    "Balatro".to_string(),
            backup_dirname: "_backup_BalatroArt".to_string(),
        }
    }
}

impl GameConfig {
    /// Unity data folder, `<exe stem>_Data`.
    pub fn data_dirname(&self) -> String {
        let stem = self
            .exe_name
            .rsplit_once('.')
            .map_or(self.exe_name.as_str(), |(stem, _)| stem);
        format!("{stem}_Data")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// Path inside both the mod archive and the binary's container.
    pub internal_path:       String,
    /// Archiver locations tried in order; bare names are looked up on `PATH`.
    pub archiver_candidates: Vec<String>,
    /// Upper bound on one archiver run. `0` waits indefinitely.
    pub timeout_secs:        u64,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            internal_path:       DEFAULT_INTERNAL_PATH.to_string(),
            archiver_candidates: vec![
                r"C:\Program Files\7-Zip\7z.exe".to_string(),
                r"C:\Program Files (x86)\7-Zip\7z.exe".to_string(),
                "7z.exe".to_string(),
                "7z".to_string(),
                "7zz".to_string(),
            ],
            timeout_secs:        600,
        }
    }
}

impl PatchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub steam_roots: Vec<PathBuf>,
    /// Install directories to offer besides the Steam ones.
    pub extra_dirs:  Vec<PathBuf>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            steam_roots: default_steam_roots(OS::current(), user_home()),
            extra_dirs:  Vec::new(),
        }
    }
}

impl LocatorConfig {
    pub fn locator(&self, folder_name: &str) -> SteamLocator {
        SteamLocator::with_roots(self.steam_roots.clone(), folder_name).extra_dirs(self.extra_dirs.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub timeout_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game:     GameConfig::default(),
            patch:    PatchConfig::default(),
            locator:  LocatorConfig::default(),
            mods_dir: PathBuf::from("mods"),
            download: DownloadConfig::default(),
        }
    }
}
