use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use deckpatch_install::{ModArchive, ModCatalog};
use tabled::Tabled;

use crate::cli::Session;
use crate::ui::human_bytes;
use crate::ui::table::Formatter;

#[derive(Args, Clone, Debug)]
pub struct ModsArg {
    /// Directory of mod archives; defaults to `mods_dir` from the config
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct InfoArg {
    /// Mod archive path, or the name of a bundled mod
    archive: String,
}

#[derive(Tabled)]
struct ModRow {
    #[tabled(rename = "Mod")]
    name:   String,
    #[tabled(rename = "Size")]
    size:   String,
    #[tabled(rename = "SHA-256")]
    sha256: String,
}

impl ModRow {
    fn of(archive: &ModArchive) -> Self {
        let unreadable = || style("unreadable").red().to_string();
        Self {
            name:   archive.name(),
            size:   archive.size_bytes().map(human_bytes).unwrap_or_else(|_| unreadable()),
            sha256: archive.digest().map(str::to_string).unwrap_or_else(|_| unreadable()),
        }
    }
}

pub fn list(session: &Session, arg: &ModsArg) -> Result<()> {
    let dir = arg.dir.as_ref().unwrap_or(&session.config.mods_dir);
    let catalog = ModCatalog::scan(dir).with_context(|| format!("cannot list {}", dir.display()))?;

    if catalog.is_empty() {
        println!("No mod archives in {}", dir.display());
        return Ok(());
    }

    let table = Formatter::default()
        .footer(format!("{} mod(s) in {}", catalog.len(), dir.display()))
        .build(catalog.iter().map(ModRow::of));
    println!("{table}");
    Ok(())
}

pub fn info(session: &Session, arg: &InfoArg) -> Result<()> {
    let archive = resolve_local(session, &arg.archive)?;
    let size = archive.size_bytes()?;
    let digest = archive.digest()?;

    println!("{}", style(archive.name()).bold());
    println!("  path    {}", archive.path().display());
    println!("  size    {} ({size} bytes)", human_bytes(size));
    println!("  sha256  {digest}");
    Ok(())
}

/// A bundled mod by name, otherwise a path on disk.
pub fn resolve_local(session: &Session, name_or_path: &str) -> Result<ModArchive> {
    let path = PathBuf::from(name_or_path);
    if path.is_file() {
        return Ok(ModArchive::new(path));
    }

    let dir = &session.config.mods_dir;
    let catalog = ModCatalog::scan(dir).with_context(|| format!("cannot list {}", dir.display()))?;
    catalog
        .find(name_or_path)
        .map(|found| ModArchive::new(found.path()))
        .with_context(|| format!("no archive at {name_or_path} and no bundled mod named {name_or_path} in {}", dir.display()))
}
