use std::fmt;
use std::path::{Path, PathBuf};

use deckpatch_archive::{StageOptions, stage};
use deckpatch_fs::{backup_file, backup_path, backup_tree, restore_file, restore_tree};
use tracing::{debug, info, warn};

use crate::config::PatchConfig;
use crate::error::{InstallError, PatchError};
use crate::game::GameInstallation;
use crate::hooks::InstallHook;
use crate::patcher::{ArchiveUpdater, PatchResult, apply_to_binary};

/// Steps of one install run, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallStage {
    Preflight,
    BackupTarget,
    StageArchive,
    InvokePatch,
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallStage::Preflight => write!(f, "preflight"),
            InstallStage::BackupTarget => write!(f, "backup"),
            InstallStage::StageArchive => write!(f, "stage"),
            InstallStage::InvokePatch => write!(f, "patch"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct InstallOutcome {
    pub result:       PatchResult,
    /// The binary's `.bak`, possibly from an earlier install.
    pub backup:       PathBuf,
    pub staged_files: usize,
    /// Whether the archive had the expected internal layout.
    pub layout_ok:    bool,
}

/// What a restore actually put back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub binary: bool,
    pub assets: bool,
}

impl RestoreReport {
    pub fn nothing_restored(&self) -> bool {
        !self.binary && !self.assets
    }
}

/// Runs installs and restores against a [`GameInstallation`].
///
/// Callers must not run two operations on the same game concurrently;
/// hold a [`deckpatch_fs::InstallLock`] on [`GameInstallation::lock_path`].
pub struct Installer<U> {
    updater:       U,
    internal_path: String,
    stage_options: StageOptions,
    hooks:         Vec<Box<dyn InstallHook>>,
}

impl<U: ArchiveUpdater> Installer<U> {
    pub fn new(updater: U, config: &PatchConfig) -> Self {
        Self {
            updater,
            internal_path: config.internal_path.clone(),
            stage_options: StageOptions::default().internal_path(&config.internal_path),
            hooks: Vec::new(),
        }
    }

    /// Override staging placement. The internal path stays the configured one.
    pub fn stage_options(mut self, options: StageOptions) -> Self {
        self.stage_options = options.internal_path(&self.internal_path);
        self
    }

    pub fn hook<H: InstallHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn updater(&self) -> &U {
        &self.updater
    }

    /// Install the mod at `archive` into `game`'s binary.
    ///
    /// Preconditions are checked before anything is written. A failure after
    /// the backup step leaves the `.bak` in place for [`Installer::restore`].
    pub fn install(&self, game: &GameInstallation, archive: &Path) -> Result<InstallOutcome, InstallError> {
        match self.run(game, archive) {
            Ok(outcome) => {
                for hook in &self.hooks {
                    hook.on_success(game, &outcome.result);
                }
                Ok(outcome)
            }
            Err(error) => {
                if let Some(stage) = error.stage() {
                    for hook in &self.hooks {
                        hook.on_failure(stage, &error);
                    }
                }
                Err(error)
            }
        }
    }

    fn run(&self, game: &GameInstallation, archive: &Path) -> Result<InstallOutcome, InstallError> {
        let exe = game.executable();

        self.enter(InstallStage::Preflight, game);
        if !exe.is_file() {
            return Err(InstallError::Preflight(PatchError::TargetMissing { path: exe }));
        }
        self.updater.preflight(&exe).map_err(InstallError::Preflight)?;

        self.enter(InstallStage::BackupTarget, game);
        let backup = backup_file(&exe).map_err(InstallError::Backup)?;

        self.enter(InstallStage::StageArchive, game);
        // dropping `staged` removes the staging directory on every path below
        let staged = stage(archive, &self.stage_options).map_err(InstallError::Stage)?;

        self.enter(InstallStage::InvokePatch, game);
        let result = apply_to_binary(&self.updater, staged.path(), &exe, &self.internal_path)
            .map_err(InstallError::Patch)?;

        Ok(InstallOutcome {
            result,
            backup,
            staged_files: staged.report().file_count(),
            layout_ok: staged.layout_ok(),
        })
    }

    fn enter(&self, stage: InstallStage, game: &GameInstallation) {
        debug!(%stage, "entering install stage");
        for hook in &self.hooks {
            hook.on_stage(stage, game);
        }
    }

    /// Put back the binary's `.bak` and the assets snapshot, each if present.
    ///
    /// Both steps always run; a failure in one does not skip the other.
    pub fn restore(&self, game: &GameInstallation) -> Result<RestoreReport, InstallError> {
        let mut report = RestoreReport::default();
        let mut failures = Vec::new();

        let exe = game.executable();
        match restore_file(&exe) {
            Ok(binary) => {
                if !binary {
                    debug!(backup = %backup_path(&exe).display(), "no binary backup");
                }
                report.binary = binary;
            }
            Err(err) => {
                warn!(error = %err, "binary restore failed");
                failures.push(err);
            }
        }

        match restore_tree(game.backup_root(), game.assets_dir()) {
            Ok(assets) => report.assets = assets,
            Err(err) => {
                warn!(error = %err, "assets restore failed");
                failures.push(err);
            }
        }

        if !failures.is_empty() {
            return Err(InstallError::Restore { restored: report, failures });
        }
        if report.nothing_restored() {
            warn!(root = %game.root().display(), "nothing to restore");
        } else {
            info!(root = %game.root().display(), binary = report.binary, assets = report.assets, "restored originals");
        }
        Ok(report)
    }

    /// Snapshot the assets directory into the game's backup root, once.
    pub fn backup_assets(&self, game: &GameInstallation) -> Result<PathBuf, InstallError> {
        backup_tree(game.assets_dir(), game.backup_root()).map_err(InstallError::Backup)
    }
}
