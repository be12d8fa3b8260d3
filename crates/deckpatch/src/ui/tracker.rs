use std::time::Duration;

use deckpatch_install::{GameInstallation, InstallError, InstallHook, InstallStage, PatchResult};
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

const SPINNER_STYLE: &str = "{spinner:.blue} {prefix:>10.cyan.bold} {wide_msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const TICK_INTERVAL: Duration = Duration::from_millis(100);

static SPINNER_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(SPINNER_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK))
});

/// A ticking spinner with a prefix. Hidden when stderr is not a terminal.
pub fn spinner(prefix: &str, message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let pb = match SPINNER_TEMPLATE.as_ref() {
        Some(style) => pb.with_style(style.clone()),
        None => pb,
    };
    pb.set_prefix(prefix.to_string());
    pb.set_message(message.into());
    pb.enable_steady_tick(TICK_INTERVAL);
    pb
}

/// Shows the current install stage on a spinner.
pub struct StageSpinner {
    pb: ProgressBar,
}

impl StageSpinner {
    pub fn new() -> Self {
        Self {
            pb: spinner("install", "starting"),
        }
    }
}

fn describe(stage: InstallStage) -> &'static str {
    match stage {
        InstallStage::Preflight => "checking game binary and archiver",
        InstallStage::BackupTarget => "backing up game binary",
        InstallStage::StageArchive => "extracting mod archive",
        InstallStage::InvokePatch => "updating embedded textures",
    }
}

impl InstallHook for StageSpinner {
    fn on_stage(&self, stage: InstallStage, _game: &GameInstallation) {
        self.pb.set_prefix(stage.to_string());
        self.pb.set_message(describe(stage));
    }

    fn on_success(&self, _game: &GameInstallation, _result: &PatchResult) {
        self.pb.finish_and_clear();
    }

    fn on_failure(&self, _stage: InstallStage, _error: &InstallError) {
        self.pb.finish_and_clear();
    }
}
