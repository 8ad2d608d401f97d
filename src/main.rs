use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use grove::cli::{Cli, Command};
use grove::commands;
use grove::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The browser owns the terminal, so it only logs when RUST_LOG asks for it
    let interactive = matches!(cli.command, Command::Browse(_));
    init_logging(cli.verbose, cli.quiet, interactive);

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    tracing::debug!(?config, "Loaded configuration");

    // Dispatch to subcommand
    match cli.command {
        Command::Browse(args) => {
            tracing::info!(?args, "Starting browser");
            commands::browse::run(args, &config)?;
        }
        Command::Dump(args) => {
            tracing::info!(?args, "Starting dump");
            commands::dump::run(args, &config)?;
        }
        Command::Completions(args) => {
            clap_complete::generate(args.shell, &mut Cli::command(), "grove", &mut io::stdout());
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8, quiet: bool, interactive: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if interactive {
        "off"
    } else if quiet {
        "warn"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("grove={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}
