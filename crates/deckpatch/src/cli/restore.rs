use anyhow::Result;
use clap::Args;
use console::style;
use deckpatch_fs::backup_path;
use deckpatch_install::{GameInstallation, InstallError, Installer, RestoreReport, SevenZip};

use crate::cli::{Session, lock};

#[derive(Args, Clone, Debug)]
pub struct RestoreArg {}

#[derive(Args, Clone, Debug)]
pub struct BackupAssetsArg {}

fn installer(session: &Session) -> Installer<SevenZip> {
    Installer::new(SevenZip::from_config(&session.config.patch), &session.config.patch)
}

pub fn run(session: &Session, _arg: &RestoreArg) -> Result<()> {
    let game = session.game()?;
    let _lock = lock(&game)?;

    let report = match installer(session).restore(&game) {
        Ok(report) => report,
        Err(err) => {
            if let InstallError::Restore { restored, .. } = &err {
                print_report(&game, restored);
            }
            return Err(err.into());
        }
    };

    if report.nothing_restored() {
        println!("Nothing to restore in {}", game.root().display());
        return Ok(());
    }
    print_report(&game, &report);
    Ok(())
}

fn print_report(game: &GameInstallation, report: &RestoreReport) {
    if report.binary {
        println!(
            "{} {} from {}",
            style("restored").green().bold(),
            game.executable().display(),
            backup_path(game.executable()).display()
        );
    }
    if report.assets {
        println!(
            "{} {} from {}",
            style("restored").green().bold(),
            game.assets_dir().display(),
            game.backup_root().display()
        );
    }
}

pub fn backup_assets(session: &Session, _arg: &BackupAssetsArg) -> Result<()> {
    let game = session.game()?;
    let _lock = lock(&game)?;

    let root = installer(session).backup_assets(&game)?;
    println!("Assets backup at {}", root.display());
    Ok(())
}
