//! chordlink: decode and upgrade chord-session share links
//!
//! ```text
//! chordlink [--tables <file.json>]              interactive REPL
//! chordlink [--tables <file.json>] <command>    run one command and exit
//! ```

use anyhow::{Context, Result};
use chordlink::config::Config;
use chordlink::repl;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    // Also forwards `log` records from chordlink-core
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut args = std::env::args().skip(1);
    let mut tables: Option<PathBuf> = None;
    let mut command: Vec<String> = Vec::new();
    while let Some(arg) = args.next() {
        if arg == "--tables" {
            let path = args.next().context("--tables needs a file path")?;
            tables = Some(PathBuf::from(path));
        } else {
            command.push(arg);
        }
    }

    let config = Config::load(tables.as_deref())?;
    tracing::debug!(
        keys = config.tables.keys.len(),
        chords = config.tables.chords.len(),
        "Lookup tables ready"
    );

    if command.is_empty() {
        repl::start(config)
    } else {
        repl::run_once(config, &command.join(" "))
    }
}
