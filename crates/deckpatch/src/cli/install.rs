use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Args;
use console::style;
use deckpatch_fetch::{DownloadedArchive, FetchOptions, download};
use deckpatch_install::{Installer, SevenZip, TracingHook};
use tracing::info;

use crate::cli::{Session, lock, mods};
use crate::ui::tracker::{StageSpinner, spinner};

#[derive(Args, Clone, Debug)]
pub struct InstallArg {
    /// Mod archive path, bundled mod name, or http(s) URL
    #[arg(value_name = "MOD")]
    source:   String,
    /// Archiver executable to try before the configured candidates
    #[arg(long, value_name = "PATH")]
    archiver: Option<PathBuf>,
    /// Refuse a downloaded archive whose SHA-256 differs
    #[arg(long, value_name = "HEX")]
    sha256:   Option<String>,
}

/// Where the archive for this run lives. A download is deleted when dropped.
enum Source {
    Local(PathBuf),
    Downloaded(DownloadedArchive),
}

impl Source {
    fn path(&self) -> &Path {
        match self {
            Source::Local(path) => path,
            Source::Downloaded(archive) => archive.path(),
        }
    }
}

fn is_url(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn fetch(session: &Session, arg: &InstallArg) -> Result<Source> {
    if !is_url(&arg.source) {
        if arg.sha256.is_some() {
            bail!("--sha256 only applies to downloads; use `deckpatch info` to check a local archive");
        }
        let archive = mods::resolve_local(session, &arg.source)?;
        return Ok(Source::Local(archive.path().to_path_buf()));
    }

    let mut options = match session.config.download.timeout_secs {
        0 => FetchOptions::default().no_timeout(),
        secs => FetchOptions::default().timeout(Duration::from_secs(secs)),
    };
    if let Some(hex) = &arg.sha256 {
        options = options.expected_sha256(hex.clone());
    }

    let pb = spinner("download", arg.source.clone());
    let downloaded = download(&arg.source, &options);
    pb.finish_and_clear();

    let downloaded = downloaded.with_context(|| format!("could not download {}", arg.source))?;
    println!("Downloaded {} bytes, sha256 {}", downloaded.bytes(), downloaded.sha256());
    Ok(Source::Downloaded(downloaded))
}

pub fn run(session: &Session, arg: &InstallArg) -> Result<()> {
    let game = session.game()?;
    let _lock = lock(&game)?;
    let source = fetch(session, arg)?;

    let patch = &session.config.patch;
    let mut updater = SevenZip::from_config(patch);
    if let Some(archiver) = &arg.archiver {
        updater = updater.prefer(archiver.display().to_string());
    }

    let mut installer = Installer::new(updater, patch).hook(StageSpinner::new());
    if session.verbose > 0 {
        installer = installer.hook(TracingHook);
    }

    info!(game = %game.root().display(), archive = %source.path().display(), "installing");
    match installer.install(&game, source.path()) {
        Ok(outcome) => {
            if !outcome.layout_ok {
                println!(
                    "{} archive has no {} folder; the binary may be unchanged",
                    style("warning:").yellow().bold(),
                    patch.internal_path
                );
            }
            println!("{} {}", style("installed").green().bold(), outcome.result.message);
            println!("  {} file(s) staged, original kept at {}", outcome.staged_files, outcome.backup.display());
            if session.verbose > 0 {
                if let Some(output) = &outcome.result.diagnostics {
                    println!("{output}");
                }
            }
            Ok(())
        }
        Err(err) => {
            let result = err.into_patch_result();
            if let Some(output) = &result.diagnostics {
                eprintln!("{}", style("archiver output:").dim());
                eprintln!("{output}");
            }
            bail!(result.message)
        }
    }
}
