//! Preflight - PHP container startup and health tooling
//!
//! Two independent commands run by container orchestration: `preload`
//! writes the OPcache preload script at image build or startup time, and
//! `health` verifies the PHP runtime as a liveness probe, exiting 0 when
//! healthy and 1 otherwise.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod health;
mod logging;
mod preload;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Preload(args) => commands::preload::run(cli.config, args).map(|()| 0),
        Commands::Health(args) => {
            commands::health::run(cli.config, args).map(health::Status::exit_code)
        }
        Commands::Version => commands::version::run().map(|()| 0),
        Commands::Completions(args) => commands::completions::run(args).map(|()| 0),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
