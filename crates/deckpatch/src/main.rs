use std::process::ExitCode;

use clap::Parser;
use console::style;

use crate::cli::app::App;

mod cli;
mod logging;
mod settings;
mod ui;

fn main() -> ExitCode {
    let app = App::parse();
    logging::init(app.global.verbose);

    match cli::run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}
