use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cli::completions::CompletionsArg;
use crate::cli::install::InstallArg;
use crate::cli::locate::LocateArg;
use crate::cli::mods::{InfoArg, ModsArg};
use crate::cli::restore::{BackupAssetsArg, RestoreArg};

#[derive(Clone, Debug, Parser)]
#[command(name = "deckpatch", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub cmd:    Commands,
}

#[derive(Clone, Debug, Args)]
pub struct GlobalArgs {
    /// Config file to use instead of the user and working-directory files
    #[arg(long, global = true, value_name = "FILE")]
    pub config:  Option<PathBuf>,
    /// Game install directory; located automatically when omitted
    #[arg(long, short, global = true, value_name = "DIR")]
    pub game:    Option<PathBuf>,
    /// More log output (repeatable)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "l", name = "locate", about = "List candidate game install directories")]
    Locate(LocateArg),
    #[command(alias = "ls", name = "mods", about = "List bundled mod archives")]
    Mods(ModsArg),
    #[command(alias = "i", name = "info", about = "Show size and SHA-256 of a mod archive")]
    Info(InfoArg),
    #[command(name = "install", about = "Back up the game binary and install a mod into it")]
    Install(InstallArg),
    #[command(name = "restore", about = "Restore the original binary and assets from backup")]
    Restore(RestoreArg),
    #[command(name = "backup-assets", about = "Snapshot the StreamingAssets directory")]
    BackupAssets(BackupAssetsArg),
    #[command(name = "completions", about = "Print shell completions")]
    Completions(CompletionsArg),
}
