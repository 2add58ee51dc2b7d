//! crosslink: load a cross-linked record list, encode it, and reload it.

mod config;
mod input_gen;
mod metrics;
mod pipeline;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use config::Config;
use pipeline::RunStatus;

fn main() -> ExitCode {
    let config = match Config::try_parse_from(std::env::args_os()) {
        Ok(config) => config,
        Err(err) => err.exit(),
    };
    init_tracing(config.verbose);

    if config.print_config {
        config.print();
    }

    let mut stdout = std::io::stdout().lock();
    match pipeline::run(&config, &mut stdout) {
        Ok(outcome) => {
            if config.print_metrics && outcome.status == RunStatus::Completed {
                outcome.metrics.print_summary();
            }
            match outcome.status {
                RunStatus::Completed => ExitCode::SUCCESS,
                RunStatus::EmptyInput => {
                    eprintln!("Empty or invalid list.");
                    ExitCode::FAILURE
                }
            }
        }
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so the dumps on stdout stay clean.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
