use anyhow::Result;
use clap::Args;
use console::style;
use deckpatch_platform::locate::LocatorService;
use tabled::Tabled;

use crate::cli::Session;
use crate::ui::table::Formatter;

#[derive(Args, Clone, Debug)]
pub struct LocateArg {
    /// Also print what discovery skipped and why
    #[arg(long)]
    diagnostics: bool,
}

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "Directory")]
    dir:    String,
    #[tabled(rename = "Binary")]
    binary: &'static str,
}

pub fn run(session: &Session, arg: &LocateArg) -> Result<()> {
    let config = &session.config;
    let discovery = config.locator.locator(&config.game.folder_name).discover();

    if discovery.candidates.is_empty() {
        println!("{}", style("No game directory found. Pass --game <DIR> to other commands.").yellow());
    } else {
        let rows = discovery.candidates.iter().map(|dir| CandidateRow {
            dir:    dir.display().to_string(),
            binary: if dir.join(&config.game.exe_name).is_file() { "yes" } else { "missing" },
        });
        println!("{}", Formatter::default().build(rows));
    }

    if arg.diagnostics || session.verbose > 0 {
        for diagnostic in &discovery.diagnostics {
            println!("{} {}: {}", style("skipped").dim(), diagnostic.path.display(), diagnostic.message);
        }
    }
    Ok(())
}
