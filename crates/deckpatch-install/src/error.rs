use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::installer::{InstallStage, RestoreReport};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("game directory not found: {path}")]
    NotADirectory { path: PathBuf },
}

/// Failures of the external archiver step.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("no archiver found; tried {}", .searched.join(", "))]
    ToolNotFound { searched: Vec<String> },

    #[error("target binary not found: {path}")]
    TargetMissing { path: PathBuf },

    #[error("archiver exited with {}: {}", describe_exit(.code), combined_output(.stdout, .stderr))]
    ExternalTool {
        code:   Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("archiver did not finish within {after:?}")]
    TimedOut { after: Duration },

    #[error("failed to run archiver {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source:  deckpatch_platform::Error,
    },

    #[error("failed to resolve {path}: {source}")]
    Resolve {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PatchError {
    /// Raw tool output worth showing alongside the message.
    pub fn diagnostics(&self) -> Option<String> {
        match self {
            PatchError::ExternalTool { stdout, stderr, .. } => Some(combined_output(stdout, stderr)),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("cannot install: {0}")]
    Preflight(#[source] PatchError),

    #[error("backup failed, nothing was patched: {0}")]
    Backup(#[source] deckpatch_fs::Error),

    #[error("could not stage mod archive: {0}")]
    Stage(#[source] deckpatch_archive::Error),

    #[error("patch failed, the backup is still in place: {0}")]
    Patch(#[source] PatchError),

    /// One or both restore steps failed. `restored` is what still went back.
    #[error("restore incomplete: {}", join_errors(.failures))]
    Restore {
        restored: RestoreReport,
        failures: Vec<deckpatch_fs::Error>,
    },
}

impl InstallError {
    /// Install stage the error came from. `None` for restore.
    pub fn stage(&self) -> Option<InstallStage> {
        match self {
            InstallError::Preflight(_) => Some(InstallStage::Preflight),
            InstallError::Backup(_) => Some(InstallStage::BackupTarget),
            InstallError::Stage(_) => Some(InstallStage::StageArchive),
            InstallError::Patch(_) => Some(InstallStage::InvokePatch),
            InstallError::Restore { .. } => None,
        }
    }

    pub fn patch_error(&self) -> Option<&PatchError> {
        match self {
            InstallError::Preflight(e) | InstallError::Patch(e) => Some(e),
            _ => None,
        }
    }

    /// Failed [`PatchResult`](crate::PatchResult) for display.
    pub fn into_patch_result(self) -> crate::PatchResult {
        crate::PatchResult {
            success:     false,
            message:     self.to_string(),
            diagnostics: self.patch_error().and_then(PatchError::diagnostics),
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "no exit code".to_string(),
    }
}

fn join_errors(errors: &[deckpatch_fs::Error]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Both streams, stdout first, skipping whichever is blank.
pub(crate) fn combined_output(stdout: &str, stderr: &str) -> String {
    [stdout.trim(), stderr.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
