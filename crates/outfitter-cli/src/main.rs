//! Outfitter driver entry point.
//!
//! Reads commands from the file named by the first argument, or from stdin,
//! and writes one JSON response per command to stdout.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader};

use outfitter_cli::config::Config;
use outfitter_cli::observer::TracingObserver;
use outfitter_cli::runner::run_script;
use outfitter_cli::state::AppState;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber; stdout carries responses.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_writer(io::stderr)
        .init();

    tracing::info!("Starting Outfitter");

    let config = Config::from_env()?;
    let mut state = AppState::load(&config)?;
    let mut observer = TracingObserver::new();
    let stdout = io::stdout();

    match std::env::args().nth(1) {
        Some(path) => {
            let script = BufReader::new(File::open(&path)?);
            run_script(&mut state, script, stdout.lock(), &mut observer)?;
        }
        None => {
            run_script(&mut state, io::stdin().lock(), stdout.lock(), &mut observer)?;
        }
    }

    tracing::info!(refreshed = observer.refreshed(), "Outfitter stopped");
    Ok(())
}
