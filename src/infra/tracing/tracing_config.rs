use std::io::IsTerminal;
use std::io::stdout;
use std::str::FromStr;

use anyhow::anyhow;
use clap::Parser;
use display_json::DebugAsJson;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::infra::tracing::TracingMinimalTimer;

// -----------------------------------------------------------------------------
// Config
// -----------------------------------------------------------------------------

#[derive(DebugAsJson, Clone, Parser, serde::Serialize)]
pub struct TracingConfig {
    /// Event filter directives, in `EnvFilter` syntax.
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub tracing_filter: String,

    /// How tracing events will be formatted when displayed in stdout.
    #[arg(long = "tracing-log-format", env = "TRACING_LOG_FORMAT", default_value = "normal")]
    pub tracing_log_format: TracingLogFormat,
}

impl TracingConfig {
    /// Inits application global tracing registry.
    ///
    /// Uses println! to have information available in stdout before tracing is initialized.
    pub fn init(&self) -> anyhow::Result<()> {
        match self.create_subscriber().try_init() {
            Ok(()) => Ok(()),
            Err(e) => {
                println!("failed to create tracing registry | reason={:?}", e);
                Err(e.into())
            }
        }
    }

    pub fn create_subscriber(&self) -> impl SubscriberInitExt {
        println!("creating tracing registry");

        // configure stdout log layer
        let enable_ansi = stdout().is_terminal();
        println!(
            "tracing registry: enabling console logs | format={} ansi={} filter={}",
            self.tracing_log_format, enable_ansi, self.tracing_filter
        );
        let stdout_layer = match self.tracing_log_format {
            TracingLogFormat::Json => fmt::Layer::default().json().with_current_span(true).with_filter(self.env_filter()).boxed(),
            TracingLogFormat::Minimal => fmt::Layer::default()
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_target(false)
                .with_ansi(enable_ansi)
                .with_timer(TracingMinimalTimer)
                .with_filter(self.env_filter())
                .boxed(),
            TracingLogFormat::Normal => fmt::Layer::default().with_ansi(enable_ansi).with_filter(self.env_filter()).boxed(),
            TracingLogFormat::Verbose => fmt::Layer::default()
                .with_ansi(enable_ansi)
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_filter(self.env_filter())
                .boxed(),
        };

        tracing_subscriber::registry().with(stdout_layer)
    }

    /// Builds the event filter, falling back to `info` when the directives are invalid.
    fn env_filter(&self) -> EnvFilter {
        match EnvFilter::try_new(&self.tracing_filter) {
            Ok(filter) => filter,
            Err(e) => {
                println!("invalid log filter, falling back to info | filter={} reason={:?}", self.tracing_filter, e);
                EnvFilter::new("info")
            }
        }
    }
}

// -----------------------------------------------------------------------------
// LogFormat
// -----------------------------------------------------------------------------

/// Tracing event log format.
#[derive(DebugAsJson, strum::Display, Clone, Copy, Eq, PartialEq, serde::Serialize)]
pub enum TracingLogFormat {
    /// Minimal format: Time (no date), level, and message.
    #[serde(rename = "minimal")]
    #[strum(to_string = "minimal")]
    Minimal,

    /// Normal format: Default `tracing` crate configuration.
    #[serde(rename = "normal")]
    #[strum(to_string = "normal")]
    Normal,

    /// Verbose format: Full datetime, level, thread, target, and message.
    #[serde(rename = "verbose")]
    #[strum(to_string = "verbose")]
    Verbose,

    /// JSON format: Verbose information formatted as JSON.
    #[serde(rename = "json")]
    #[strum(to_string = "json")]
    Json,
}

impl FromStr for TracingLogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self, Self::Err> {
        match s.to_lowercase().trim() {
            "json" => Ok(Self::Json),
            "minimal" => Ok(Self::Minimal),
            "normal" => Ok(Self::Normal),
            "verbose" | "full" => Ok(Self::Verbose),
            s => Err(anyhow!("unknown log format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(format: TracingLogFormat) -> TracingConfig {
        TracingConfig {
            tracing_filter: "debug".to_string(),
            tracing_log_format: format,
        }
    }

    #[test]
    fn test_tracing_config_with_every_format() {
        for format in [TracingLogFormat::Json, TracingLogFormat::Minimal, TracingLogFormat::Normal, TracingLogFormat::Verbose] {
            config(format).create_subscriber();
        }
    }

    #[test]
    fn test_tracing_config_with_invalid_filter() {
        let config = TracingConfig {
            tracing_filter: "not a [valid filter".to_string(),
            tracing_log_format: TracingLogFormat::Normal,
        };
        config.create_subscriber();
    }

    #[test]
    fn test_tracing_log_format_from_str() {
        assert_eq!(TracingLogFormat::from_str("json").unwrap(), TracingLogFormat::Json);
        assert_eq!(TracingLogFormat::from_str("MINIMAL").unwrap(), TracingLogFormat::Minimal);
        assert_eq!(TracingLogFormat::from_str("full").unwrap(), TracingLogFormat::Verbose);
        assert!(TracingLogFormat::from_str("invalid").is_err());
    }
}
