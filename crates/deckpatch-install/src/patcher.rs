//! Driving the external archiver against the game binary.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::time::Duration;

use deckpatch_platform::command::Command;
use deckpatch_platform::tool::find_executable;
use tracing::{debug, info};

use crate::config::PatchConfig;
use crate::error::{PatchError, combined_output};

/// Outcome shown to the user after an install attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchResult {
    pub success:     bool,
    pub message:     String,
    /// Raw archiver output, when there was any.
    pub diagnostics: Option<String>,
}

/// What a successful archiver run printed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Updates members of an archive-like container from a directory.
pub trait ArchiveUpdater {
    /// Check that the updater can run at all. Must not touch `container`.
    fn preflight(&self, container: &Path) -> Result<(), PatchError>;

    /// Add or replace the members matching `internal_glob`, taking the files
    /// from the same relative paths under `source_dir`.
    fn apply_update(&self, container: &Path, source_dir: &Path, internal_glob: &str) -> Result<UpdateOutput, PatchError>;
}

impl<U: ArchiveUpdater + ?Sized> ArchiveUpdater for &U {
    fn preflight(&self, container: &Path) -> Result<(), PatchError> {
        (**self).preflight(container)
    }

    fn apply_update(&self, container: &Path, source_dir: &Path, internal_glob: &str) -> Result<UpdateOutput, PatchError> {
        (**self).apply_update(container, source_dir, internal_glob)
    }
}

/// Member glob for everything under `internal_path`, using the platform separator.
pub fn internal_glob(internal_path: &str) -> String {
    let trimmed = internal_path.trim_matches(|c| c == '/' || c == '\\');
    let native: String = trimmed
        .chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect();
    format!("{native}{MAIN_SEPARATOR}*")
}

/// Merge the staged `internal_path` tree into `target`.
///
/// Checks run before anything is spawned: a missing target is
/// [`PatchError::TargetMissing`], an unusable updater fails its preflight.
pub fn apply_to_binary<U: ArchiveUpdater>(
    updater: &U,
    staging_dir: &Path,
    target: &Path,
    internal_path: &str,
) -> Result<PatchResult, PatchError> {
    if !target.is_file() {
        return Err(PatchError::TargetMissing {
            path: target.to_path_buf(),
        });
    }
    updater.preflight(target)?;

    let glob = internal_glob(internal_path);
    let output = updater.apply_update(target, staging_dir, &glob)?;

    let diagnostics = combined_output(&output.stdout, &output.stderr);

    info!(target = %target.display(), internal_path, "patched binary");
    Ok(PatchResult {
        success:     true,
        message:     format!("Updated {internal_path} inside {}", target.display()),
        diagnostics: (!diagnostics.is_empty()).then_some(diagnostics),
    })
}

/// 7-Zip driven through its `u` (update) command.
#[derive(Clone, Debug)]
pub struct SevenZip {
    candidates: Vec<String>,
    timeout:    Option<Duration>,
}

impl SevenZip {
    pub fn new(candidates: Vec<String>, timeout: Option<Duration>) -> Self {
        Self { candidates, timeout }
    }

    pub fn from_config(config: &PatchConfig) -> Self {
        Self::new(config.archiver_candidates.clone(), config.timeout())
    }

    /// Try `program` before every configured candidate.
    pub fn prefer(mut self, program: impl Into<String>) -> Self {
        self.candidates.insert(0, program.into());
        self
    }

    /// Resolved archiver executable.
    pub fn locate(&self) -> Result<PathBuf, PatchError> {
        find_executable(&self.candidates).ok_or_else(|| PatchError::ToolNotFound {
            searched: self.candidates.clone(),
        })
    }
}

impl ArchiveUpdater for SevenZip {
    fn preflight(&self, _container: &Path) -> Result<(), PatchError> {
        self.locate().map(|_| ())
    }

    fn apply_update(&self, container: &Path, source_dir: &Path, internal_glob: &str) -> Result<UpdateOutput, PatchError> {
        let program = self.locate()?;
        // the archiver runs inside source_dir, so a relative container path would miss
        let container = std::path::absolute(container).map_err(|source| PatchError::Resolve {
            path: container.to_path_buf(),
            source,
        })?;

        debug!(program = %program.display(), container = %container.display(), internal_glob, "updating archive");
        let captured = Command::new(&program)
            .arg("u")
            .arg("-y")
            .arg(&container)
            .arg(internal_glob)
            .current_dir(source_dir)
            .capture(self.timeout)
            .map_err(|e| match e {
                deckpatch_platform::Error::TimedOut { after, .. } => PatchError::TimedOut { after },
                other => PatchError::Spawn {
                    program: program.display().to_string(),
                    source:  other,
                },
            })?;

        if !captured.success() {
            return Err(PatchError::ExternalTool {
                code:   captured.code(),
                stdout: captured.stdout,
                stderr: captured.stderr,
            });
        }
        Ok(UpdateOutput {
            stdout: captured.stdout,
            stderr: captured.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_glob_native_separator() {
        let sep = MAIN_SEPARATOR;
        assert_eq!(internal_glob("resources/textures/2x"), format!("resources{sep}textures{sep}2x{sep}*"));
        assert_eq!(internal_glob("/resources/textures/2x/"), format!("resources{sep}textures{sep}2x{sep}*"));
    }

    #[test]
    fn test_locate_reports_searched_candidates() {
        let zip = SevenZip::new(vec!["deckpatch_no_such_7z".to_string()], None).prefer("deckpatch_no_such_7zz");
        match zip.locate() {
            Err(PatchError::ToolNotFound { searched }) => {
                assert_eq!(searched, vec!["deckpatch_no_such_7zz", "deckpatch_no_such_7z"]);
            }
            other => panic!("expected ToolNotFound, got {other:?}"),
        }
    }

    struct Untouchable;

    impl ArchiveUpdater for Untouchable {
        fn preflight(&self, _container: &Path) -> Result<(), PatchError> {
            panic!("preflight must not run for a missing target");
        }

        fn apply_update(&self, _container: &Path, _source_dir: &Path, _glob: &str) -> Result<UpdateOutput, PatchError> {
            panic!("apply_update must not run for a missing target");
        }
    }

    #[test]
    fn test_apply_to_missing_target_spawns_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Balatro.exe");

        match apply_to_binary(&Untouchable, dir.path(), &target, "resources/textures/2x") {
            Err(PatchError::TargetMissing { path }) => assert_eq!(path, target),
            other => panic!("expected TargetMissing, got {other:?}"),
        }
    }
}
