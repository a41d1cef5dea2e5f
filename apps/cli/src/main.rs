#![allow(clippy::print_stdout, clippy::print_stderr)]

pub mod args;
pub mod handlers;

use crate::args::{Cli, Commands};
use ampa::Platform;
use ampa::domain::config::{AmpaConfig, LoggingConfig};
use ampa::features::adoption::{LogNotifier, TrustedCaptcha};
use ampa::kernel::config::load_config;
use ampa_logger::{LevelFilter, Logger, LoggerError};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{Instrument, info, info_span};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config: AmpaConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    let _log = init_logging(&config.logging, cli.verbose)?;

    info!(
        data_dir = %config.storage.data_dir.display(),
        persist = config.database.persist,
        "Opening AMPA data"
    );
    let platform = Platform::init(&config, Arc::new(TrustedCaptcha), Arc::new(LogNotifier))
        .await
        .context("Failed to open the data directory")?;

    let span = info_span!("command", name = cli.command.name());
    async {
        match cli.command {
            Commands::Pets { action } => handlers::pets(&platform, action).await?,
            Commands::Adoptions { action } => handlers::adoptions(&platform, action).await?,
            Commands::Settings { action } => handlers::settings(&platform, action).await?,
            Commands::Documents { action } => handlers::documents(&platform, &action),
        }
        info!("Command finished");
        Ok::<_, anyhow::Error>(())
    }
    .instrument(span)
    .await
}

fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<Logger, LoggerError> {
    let level = if verbose { LevelFilter::DEBUG } else { Logger::parse_level(&config.level)? };
    let mut builder = Logger::builder().name(env!("CARGO_BIN_NAME")).level(level).json(config.json);
    if let Some(filter) = &config.env_filter {
        builder = builder.env_filter(filter.clone());
    }

    match &config.directory {
        Some(directory) => builder.directory(directory).init(),
        None => builder.init(),
    }
}
