use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod classify;
mod cli;
mod config;
mod package;
mod render;
mod staging;
mod steps;
mod table;
mod util;
mod workflow;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let args = cli::RootArgs::parse();
    init_tracing(args.verbose);
    workflow::run_convert(args)
}
