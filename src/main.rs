//! Hoist CLI - provision a host and deploy a containerized app behind nginx
//!
//! Usage: hoist [OPTIONS]
//!
//!   hoist --repo <URL> --user <USER> --host <HOST> --port <PORT>
//!   hoist --cleanup --user <USER> --host <HOST> --port <PORT>

mod commands;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hoist::presentation::Cli;

/// Exit status after Ctrl+C
const INTERRUPTED: i32 = 130;

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = ctrlc::set_handler(|| {
        eprintln!(
            "\nInterrupted. Nothing is rolled back; run hoist again to reconcile the host."
        );
        std::process::exit(INTERRUPTED);
    }) {
        tracing::warn!("cannot install the Ctrl+C handler: {e}");
    }

    if let Err(e) = commands::run::cmd_run(&cli) {
        std::process::exit(commands::error_kind(&e).exit_code());
    }
}

/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hoist={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .without_time()
        .init();
}
