//! Extraction of a mod archive into a fresh staging area.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use deckpatch_fs::StagingArea;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::options::StageOptions;
use crate::report::{ExtractedEntry, SkippedEntry, StageReport};
use crate::sanitize::{is_unsafe_entry_name, safe_join};

/// A mod archive extracted into its own staging area.
///
/// Dropping this removes the staging directory.
#[derive(Debug)]
pub struct StagedArchive {
    area: StagingArea,
    report: StageReport,
    layout_ok: bool,
    internal_path: PathBuf,
}

impl StagedArchive {
    pub fn path(&self) -> &Path {
        self.area.path()
    }

    pub fn report(&self) -> &StageReport {
        &self.report
    }

    /// Whether the expected internal subpath exists in the staged tree.
    pub fn layout_ok(&self) -> bool {
        self.layout_ok
    }

    pub fn internal_path(&self) -> &Path {
        &self.internal_path
    }
}

/// Extract `archive_path` into a new staging area.
///
/// Directory entries are skipped; only files (and their parent directories)
/// are written. Entries with `..` segments or a leading separator are refused
/// and recorded in the report. A missing internal subpath is a warning, not an
/// error.
pub fn stage(archive_path: impl AsRef<Path>, options: &StageOptions) -> Result<StagedArchive> {
    let archive_path = archive_path.as_ref();

    let area = match &options.staging_parent {
        Some(parent) => StagingArea::in_dir(parent, &options.prefix)?,
        None => StagingArea::new(&options.prefix)?,
    };

    let file = File::open(archive_path).map_err(|e| Error::Open {
        path: archive_path.to_path_buf(),
        source: e,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| Error::Corrupted {
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut report = StageReport::default();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| Error::Corrupted {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let name = entry.name().to_string();

        if entry.is_dir() {
            continue;
        }

        if is_unsafe_entry_name(&name) {
            warn!(entry = %name, "refusing unsafe archive entry");
            report.skipped.push(SkippedEntry {
                original_path: name,
                reason: "parent-directory segment or leading separator",
            });
            continue;
        }

        let target = safe_join(area.path(), &name)?;
        write_file(&mut entry, &target)?;

        let size = entry.size();
        report.total_bytes += size;
        report.entries.push(ExtractedEntry {
            original_path: name,
            target_path: target,
            size,
        });
    }

    let layout_ok = area.path().join(&options.internal_path).is_dir();
    if layout_ok {
        info!(
            archive = %archive_path.display(),
            files = report.file_count(),
            bytes = report.total_bytes,
            "staged mod archive"
        );
    } else {
        warn!(
            archive = %archive_path.display(),
            expected = %options.internal_path.display(),
            "archive does not mirror the expected layout; continuing"
        );
    }

    Ok(StagedArchive {
        area,
        report,
        layout_ok,
        internal_path: options.internal_path.clone(),
    })
}

fn write_file(reader: &mut impl io::Read, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreationFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let mut file = File::create(target).map_err(|e| Error::ExtractionFailed {
        path: target.to_path_buf(),
        source: e,
    })?;
    io::copy(reader, &mut file).map_err(|e| Error::ExtractionFailed {
        path: target.to_path_buf(),
        source: e,
    })?;
    debug!(path = %target.display(), "wrote entry");
    Ok(())
}
