//! CLI entry point for muxgrab.

mod cli;
mod command;
mod multiplexer;
mod output;
mod trim;

use clap::{CommandFactory, Parser};

fn main() {
    init_tracing();

    let args = cli::Args::parse();

    if args.version {
        cli::print_version();
        return;
    }

    // Invoking without a destination prints usage and exits 0, not an
    // argument error.
    let Some(file) = args.file.clone() else {
        let _ = cli::Args::command().print_help();
        return;
    };

    if let Err(e) = command::capture::run(&file, &args) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr and stay off unless MUXGRAB_LOG is set, so the
/// captured terminal only ever sees the progress notice.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("MUXGRAB_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
