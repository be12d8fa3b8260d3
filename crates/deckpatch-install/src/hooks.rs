//! Observers for the install lifecycle.
//!
//! Hooks see every stage transition and the final outcome. They cannot veto
//! a run; the workflow's guarantees do not depend on them.

use tracing::{info, warn};

use crate::error::InstallError;
use crate::game::GameInstallation;
use crate::installer::InstallStage;
use crate::patcher::PatchResult;

pub trait InstallHook: Send + Sync {
    /// Called when `stage` begins.
    fn on_stage(&self, _stage: InstallStage, _game: &GameInstallation) {}

    /// Called after the archiver reported success.
    fn on_success(&self, _game: &GameInstallation, _result: &PatchResult) {}

    /// Called once when a run fails, with the stage it failed in.
    fn on_failure(&self, _stage: InstallStage, _error: &InstallError) {}
}

/// Logs each transition through `tracing`.
pub struct TracingHook;

impl InstallHook for TracingHook {
    fn on_stage(&self, stage: InstallStage, game: &GameInstallation) {
        info!(%stage, root = %game.root().display(), "install stage");
    }

    fn on_success(&self, game: &GameInstallation, result: &PatchResult) {
        info!(root = %game.root().display(), message = %result.message, "install finished");
    }

    fn on_failure(&self, stage: InstallStage, error: &InstallError) {
        warn!(%stage, %error, "install failed");
    }
}
