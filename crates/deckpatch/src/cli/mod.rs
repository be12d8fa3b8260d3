pub mod app;
pub mod completions;
pub mod install;
pub mod locate;
pub mod mods;
pub mod restore;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use deckpatch_fs::InstallLock;
use deckpatch_install::{Config, GameInstallation};
use deckpatch_platform::locate::LocatorService;
use tracing::debug;

use crate::cli::app::{App, Commands};
use crate::settings;

pub fn run(app: App) -> Result<()> {
    if let Commands::Completions(arg) = &app.cmd {
        return completions::run(arg);
    }

    let config = settings::load(app.global.config.as_deref())?;
    let session = Session {
        config,
        game: app.global.game,
        verbose: app.global.verbose,
    };

    match app.cmd {
        Commands::Locate(arg) => locate::run(&session, &arg),
        Commands::Mods(arg) => mods::list(&session, &arg),
        Commands::Info(arg) => mods::info(&session, &arg),
        Commands::Install(arg) => install::run(&session, &arg),
        Commands::Restore(arg) => restore::run(&session, &arg),
        Commands::BackupAssets(arg) => restore::backup_assets(&session, &arg),
        Commands::Completions(_) => Ok(()),
    }
}

/// What every command gets to work with.
pub struct Session {
    pub config:  Config,
    pub game:    Option<PathBuf>,
    pub verbose: u8,
}

impl Session {
    /// The `--game` directory, or the first located one that has the binary.
    pub fn game(&self) -> Result<GameInstallation> {
        let root = match &self.game {
            Some(root) => root.clone(),
            None => self.locate_game()?,
        };
        GameInstallation::open(&root, &self.config.game).with_context(|| format!("cannot use {}", root.display()))
    }

    fn locate_game(&self) -> Result<PathBuf> {
        let locator = self.config.locator.locator(&self.config.game.folder_name);
        let candidates = locator.list_candidate_install_directories();
        let exe = &self.config.game.exe_name;

        match candidates.iter().find(|dir| dir.join(exe).is_file()) {
            Some(found) => {
                debug!(root = %found.display(), "using located game directory");
                Ok(found.clone())
            }
            None if candidates.is_empty() => bail!("no game directory found; pass --game <DIR>"),
            None => bail!(
                "no located directory contains {exe} ({}); pass --game <DIR>",
                join_paths(&candidates)
            ),
        }
    }
}

/// Hold the per-game lock for a mutating command.
pub fn lock(game: &GameInstallation) -> Result<InstallLock> {
    InstallLock::try_acquire(game.lock_path())
        .with_context(|| format!("another deckpatch operation is running on {}", game.root().display()))
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
