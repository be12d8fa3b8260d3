//! Card-art mod installation for a single game binary.
//!
//! An install runs `Preflight → BackupTarget → StageArchive → InvokePatch`.
//! The target binary is never handed to the archiver without a `.bak`
//! snapshot beside it, and the staging directory is removed however the
//! run ends. [`Installer::restore`] is independent of any install and
//! treats "nothing to restore" as success.
//!
//! The external archiver sits behind [`ArchiveUpdater`] so the workflow can
//! be driven by a fake in tests. [`SevenZip`] is the real implementation.

mod catalog;
mod config;
mod error;
mod game;
mod hooks;
mod installer;
mod patcher;

pub use catalog::{ModArchive, ModCatalog};
pub use config::{Config, DownloadConfig, GameConfig, LocatorConfig, PatchConfig};
pub use error::{GameError, InstallError, PatchError};
pub use game::GameInstallation;
pub use hooks::{InstallHook, TracingHook};
pub use installer::{InstallOutcome, InstallStage, Installer, RestoreReport};
pub use patcher::{ArchiveUpdater, PatchResult, SevenZip, UpdateOutput, apply_to_binary, internal_glob};
