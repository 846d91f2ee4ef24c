//! Ignition CLI - boot-test harness for bare-metal kernel images.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on debug flag. Logs go to stderr; stdout
    // belongs to the subject's serial console during emulation.
    let filter = if cli.debug {
        "ignition=debug,ignition_core=debug"
    } else {
        "ignition=info,ignition_core=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = match commands::load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ignition: {err:#}");
            return ExitCode::from(commands::EXIT_CONFIG);
        }
    };

    match cli.command {
        Commands::Run => commands::run::execute(&config),
        Commands::Provision => commands::provision::execute(&config),
        Commands::Build => commands::build::execute(&config),
    }
}
