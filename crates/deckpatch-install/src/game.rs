use std::path::{Path, PathBuf};

use deckpatch_platform::locate::streaming_assets_dir;
use deckpatch_platform::os::OS;
use deckpatch_verify::Sha256Hasher;

use crate::config::GameConfig;
use crate::error::GameError;


/// A game install directory. Everything else is derived on demand.
#[derive(Clone, Debug)]
pub struct GameInstallation {
    root:           PathBuf,
    exe_name:       String,
    data_dirname:   String,
    backup_dirname: String,
}

impl GameInstallation {
    pub fn open(root: impl Into<PathBuf>, config: &GameConfig) -> Result<Self, GameError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(GameError::NotADirectory { path: root });
        }
        Ok(Self {
            root,
            exe_name: config.exe_name.clone(),
            data_dirname: config.data_dirname(),
            backup_dirname: config.backup_dirname.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn executable(&self) -> PathBuf {
        self.root.join(&self.exe_name)
    }

    pub fn has_executable(&self) -> bool {
        self.executable().is_file()
    }

    /// `StreamingAssets` for the running platform.
    pub fn assets_dir(&self) -> PathBuf {
        streaming_assets_dir(OS::current(), &self.root, &self.data_dirname)
    }

    pub fn backup_root(&self) -> PathBuf {
        self.root.join(&self.backup_dirname)
    }

    /// Per-root lock file in the system temp dir, keyed by a hash of the root.
    ///
    /// Kept out of the game directory and out of the backup root, whose
    /// existence marks an assets snapshot as taken.
    pub fn lock_path(&self) -> PathBuf {
        let key = Sha256Hasher::digest_hex(self.root.as_os_str().as_encoded_bytes());
        std::env::temp_dir().join(format!("deckpatch-{}.lock", &key[..16]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_requires_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            GameInstallation::open(&missing, &GameConfig::default()),
            Err(GameError::NotADirectory { path }) if path == missing
        ));

        let file = dir.path().join("file");
        std::fs::write(&file, b"").unwrap();
        assert!(GameInstallation::open(&file, &GameConfig::default()).is_err());
    }

    #[test]
    fn test_derived_paths() {
        let dir = tempdir().unwrap();
        let game = GameInstallation::open(dir.path(), &GameConfig::default()).unwrap();

        assert_eq!(game.executable(), dir.path().join("Balatro.exe"));
        assert!(!game.has_executable());
        std::fs::write(game.executable(), b"MZ").unwrap();
        assert!(game.has_executable());

        assert_eq!(game.backup_root(), dir.path().join("_backup_BalatroArt"));
        assert!(game.assets_dir().ends_with("StreamingAssets"));
    }

    #[test]
    fn test_lock_path_is_outside_the_game_and_stable_per_root() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        std::fs::create_dir_all(&a).unwrap();
        std::fs::create_dir_all(&b).unwrap();

        let game_a = GameInstallation::open(&a, &GameConfig::default()).unwrap();
        let game_b = GameInstallation::open(&b, &GameConfig::default()).unwrap();

        let lock = game_a.lock_path();
        assert!(!lock.starts_with(&a));
        assert!(!lock.starts_with(game_a.backup_root()));
        assert_eq!(lock, GameInstallation::open(&a, &GameConfig::default()).unwrap().lock_path());
        assert_ne!(lock, game_b.lock_path());
    }
}
