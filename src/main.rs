use std::str::FromStr;

use ansatz_diagram::cli::Args;
use clap::Parser;
use log::{LevelFilter, debug, error, info};

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!("Parsed arguments: {args:?}");

    // Failures are reported on stdout and the process still exits normally.
    if let Err(err) = ansatz_diagram::run(&args) {
        error!("{err:#}");
        println!("An unexpected error occurred during simulation: {err}");
        println!(
            "Check that the qubit count is at least 1, the layer count is not negative, and the output path is writable."
        );
        return;
    }

    info!("Completed successfully");
}
