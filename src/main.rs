use clap::Parser;
use punkt_export::cli::commands::{EXIT_CONFIG, EXIT_FATAL};
use punkt_export::cli::{Cli, Commands};
use punkt_export::config::{load_config_or_default, PunktConfig};
use punkt_export::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let (config_path, explicit) = cli.config_path();
    let config = match load_config_or_default(config_path, explicit) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(EXIT_CONFIG);
        }
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.application.log_level);
    let guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_CONFIG);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "punkt-export");

    let exit_code = match execute_command(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, config: &PunktConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(config),
        Commands::Batch(args) => args.execute(config),
        Commands::Verify(args) => args.execute(),
        Commands::Init(args) => args.execute(),
    }
}
