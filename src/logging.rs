//! Tracing subscriber setup for hosts embedding wiregram.
//!
//! The library only emits `tracing` events and spans; installing a subscriber is left to
//! the host. [init] is the one-call setup driven by the `[logging]` config section:
//! `level` is an `EnvFilter` directive string (`"warn"`, `"wiregram::parsing=debug"`),
//! `format` picks the compact, pretty or json formatter. Output goes to stderr.

use std::io;
use thiserror::Error;
use tracing_subscriber::filter::{EnvFilter, ParseError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, Layer, Registry};
use wiregram_config::{LogFormat, LoggingConfig};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    #[error("a global subscriber is already installed: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Installs the global subscriber described by `config`.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = filter_for(config)?;
    let layer = format_layer(config.format).with_filter(filter);
    tracing_subscriber::registry().with(layer).try_init()?;
    Ok(())
}

/// The filter `init` would install.
pub fn filter_for(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    Ok(EnvFilter::try_new(&config.level)?)
}

fn format_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    match format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(io::stderr)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(io::stderr)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(io::stderr)
            .boxed(),
    }
}
