//! Tracing setup.
//!
//! Console-only `tracing-subscriber` output, pretty or JSON, written to
//! stderr so stdout stays free for piping.
//!
//! # Configuration
//!
//! - `RUST_LOG`: filter directives; when unset, `observability.logging.level`
//!   applies
//!
//! # Usage
//!
//! ```rust,ignore
//! use report_dashboard::telemetry::init_tracing;
//!
//! init_tracing(&config.observability.logging)?;
//! ```

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::config::{LogFormat, LoggingConfig};

/// Tracing initialization errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured level is not a valid filter directive.
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Build the env filter: `RUST_LOG` first, then the configured level.
pub fn env_filter(logging: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&logging.level)?),
    }
}

/// Install the global tracing subscriber.
pub fn init_tracing(logging: &LoggingConfig) -> Result<(), TelemetryError> {
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = env_filter(logging)?;
    let span_events = if logging.include_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(span_events)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().finish().try_init()?,
        LogFormat::Pretty => builder.with_target(false).finish().try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_parses() {
        let logging = LoggingConfig {
            level: "report_dashboard=debug,warn".to_string(),
            ..LoggingConfig::default()
        };
        assert!(env_filter(&logging).is_ok());
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        // Only meaningful when RUST_LOG does not override the level.
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let logging = LoggingConfig {
            level: "report_dashboard=notalevel".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(env_filter(&logging), Err(TelemetryError::Filter(_))));
    }
}
