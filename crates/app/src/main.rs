//! Seatplan - event seating planner
//!
//! Terminal front end over seatplan-core. Each invocation loads the events
//! snapshot, applies one command and saves the snapshot if it changed.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod render;
mod state;

fn main() {
    // Initialize logging (stderr, so command output stays clean)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = cli::Cli::parse();
    tracing::debug!(command = ?cli.command, "Starting Seatplan");

    if let Err(e) = commands::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
