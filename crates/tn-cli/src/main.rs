use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tn_cli::commands::{insert, summary, toggle};
use tn_cli::{Cli, Commands, load_config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(precision) = cli.precision {
        config.precision = precision;
    }
    if let Some(clock) = cli.clock {
        config.clock = clock;
    }
    if cli.wrap_column.is_some() {
        config.wrap_column = cli.wrap_column;
    }
    config.validate().context("invalid configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = std::io::stdout().lock();
    match &cli.command {
        Some(Commands::Toggle(args)) => toggle::run(&mut stdout, args, &config)?,
        Some(Commands::Insert(args)) => insert::run(&mut stdout, args, &config)?,
        Some(Commands::Summary(args)) => summary::run(&mut stdout, args, &config)?,
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
