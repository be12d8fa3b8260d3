use std::io::{self, IsTerminal};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV: &str = "DECKPATCH_LOG";

/// Install the stderr subscriber. `DECKPATCH_LOG` wins over `-v`.
pub fn init(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(verbose > 1)
        .with_ansi(io::stderr().is_terminal())
        .without_time();

    tracing_subscriber::registry().with(filter).with(layer).init();
}
