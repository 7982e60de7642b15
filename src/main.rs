//! Stepwise CLI - Drive a change request through an ordered, resumable sequence of implementation steps

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use stepwise::cli::commands::{self, GlobalOptions};
use stepwise::cli::{Cli, Commands};
use stepwise::errors::to_exit_code;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over the verbosity flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

fn run(cli: Cli) -> stepwise::Result<()> {
    let options = GlobalOptions {
        cwd: cli.cwd,
        config: cli.config,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Implement {
            change_request,
            reset,
        } => commands::implement::run(&options, &change_request, reset),
        Commands::Status {
            change_request,
            json,
        } => commands::status::run(&options, &change_request, json),
        Commands::Steps { json } => commands::steps::run(&options, json),
    }
}
