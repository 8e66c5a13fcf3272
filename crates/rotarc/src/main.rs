//! Rotarc CLI - archive, size-check, and prune log directories

use anyhow::Result;
use clap::Parser;
use rotarc_core::{Config, SCRIPT_LOG_FILE};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    output::set_json_mode(cli.json);

    let config = match cli.config_file() {
        Ok(file) => Config::resolve(file, cli.overrides()),
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("rotarc={0},rotarc_engine={0},rotarc_core={0}", log_level).into());

    // Mirror engine actions into <main_dir>/rotarc.log when possible;
    // the guard has to outlive the run for buffered lines to flush
    let _guard = if !cli.no_log_file && config.main_dir.is_dir() {
        let appender = tracing_appender::rolling::never(&config.main_dir, SCRIPT_LOG_FILE);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().without_time())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().without_time())
            .init();
        None
    };

    tracing::debug!(
        "Resolved config: log_dir={}, archive_dir={}, threshold_mb={}, pattern={}",
        config.log_dir.display(),
        config.archive_dir.display(),
        config.threshold_mb,
        config.pattern
    );

    let result = match cli.command {
        Commands::Run => commands::run::execute(&config),
        Commands::Archive => commands::archive::execute(&config),
        Commands::Check => commands::check::execute(&config),
        Commands::Prune => commands::prune::execute(&config),
    };

    if let Err(e) = result {
        output::print_error(&e.to_string());
        // Flush the file appender before exiting non-zero
        drop(_guard);
        std::process::exit(1);
    }

    Ok(())
}
