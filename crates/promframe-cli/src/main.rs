//! Promframe CLI binary entrypoint.
//!
//! This is the main entry point for the `promframe` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use promframe_cli::cli::{Cli, Commands};
use promframe_cli::commands;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), promframe_cli::CliError> {
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Fetch(args) => {
            commands::fetch(&cli.prometheus_url, &args, &mut stdout).await?;
        }
        Commands::Labels { snapshot } => {
            commands::labels(&snapshot, &mut stdout)?;
        }
        Commands::Frame(args) => {
            commands::frame(&args, &mut stdout)?;
        }
        Commands::Correlate(args) => {
            commands::correlate(&args, &mut stdout)?;
        }
        Commands::Align(args) => {
            commands::align(&args, &mut stdout)?;
        }
    }

    Ok(())
}
