//! Logger module
//!
//! A logging setup based on `tracing-subscriber` with support for:
//! - Console output with color control
//! - File output in Full, Compact or JSON format

pub mod config;
pub mod error;
pub(crate) mod writer;


pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use writer::FileWriter;

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Install the global subscriber described by `config`.
///
/// Fails if a global subscriber is already set.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    build_subscriber(&config)?
        .try_init()
        .map_err(subscriber_error)?;
    Ok(())
}

/// Build the subscriber for `config` without installing it.
pub(crate) fn build_subscriber(config: &LoggerConfig) -> anyhow::Result<BoxedSubscriber> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = match (config.console.enabled, config.file.enabled) {
        (true, true) => build_both(config, filter)?,
        (true, false) => build_console_only(&config.console, filter),
        (false, true) => build_file_only(&config.file, filter)?,
        (false, false) => anyhow::bail!("At least one output (console or file) must be enabled"),
    };

    Ok(subscriber)
}

fn use_ansi(config: &ConsoleConfig) -> bool {
    config.colored && std::io::stdout().is_terminal()
}

fn subscriber_error(e: impl std::fmt::Display) -> LoggerError {
    LoggerError::subscriber(e.to_string())
}

fn build_console_only(config: &ConsoleConfig, filter: EnvFilter) -> BoxedSubscriber {
    Box::new(
        tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .with_ansi(use_ansi(config))
                .with_target(true)
                .with_level(true),
        ),
    )
}

fn build_file_only(config: &FileConfig, filter: EnvFilter) -> Result<BoxedSubscriber, LoggerError> {
    let writer = FileWriter::new(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let subscriber: BoxedSubscriber = match config.format {
        LogFormat::Full => Box::new(
            registry.with(fmt::layer().with_ansi(false).with_target(true).with_writer(writer)),
        ),
        LogFormat::Compact => Box::new(
            registry.with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .compact()
                    .with_writer(writer),
            ),
        ),
        LogFormat::Json => {
            Box::new(registry.with(fmt::layer().with_ansi(false).json().with_writer(writer)))
        }
    };

    Ok(subscriber)
}

fn build_both(config: &LoggerConfig, filter: EnvFilter) -> Result<BoxedSubscriber, LoggerError> {
    let writer = FileWriter::new(&config.file)?;
    let ansi = use_ansi(&config.console);
    let registry = tracing_subscriber::registry().with(filter);

    // The file layer goes first so console ANSI codes do not leak into the file.
    let subscriber: BoxedSubscriber = match config.file.format {
        LogFormat::Full => Box::new(
            registry
                .with(fmt::layer().with_ansi(false).with_target(true).with_writer(writer))
                .with(fmt::layer().with_ansi(ansi).with_target(true).with_level(true)),
        ),
        LogFormat::Compact => Box::new(
            registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(true)
                        .compact()
                        .with_writer(writer),
                )
                .with(fmt::layer().with_ansi(ansi).with_target(true).with_level(true)),
        ),
        LogFormat::Json => Box::new(
            registry
                .with(fmt::layer().with_ansi(false).json().with_writer(writer))
                .with(fmt::layer().with_ansi(ansi).with_target(true).with_level(true)),
        ),
    };

    Ok(subscriber)
}
