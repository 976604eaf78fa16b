use thiserror::Error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `level` is used as the filter
/// directive (e.g. `info` or `projects_github_etl=debug,tower=warn`).
pub fn init(level: &str) -> Result<(), TracingInitError> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), level)?;

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|source| TracingInitError::SetGlobalDefault { source })?;

    Ok(())
}

fn build_filter(from_env: Option<&str>, fallback: &str) -> Result<EnvFilter, TracingInitError> {
    if let Some(directives) = from_env.filter(|d| !d.trim().is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return Ok(filter);
        }
    }

    EnvFilter::try_new(fallback).map_err(|source| TracingInitError::InvalidFilter { source })
}

#[derive(Debug, Error)]
pub enum TracingInitError {
    #[error("Invalid filter config: {source}")]
    InvalidFilter {
        #[from]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to set global default subscriber: {source}")]
    SetGlobalDefault {
        #[from]
        source: tracing::subscriber::SetGlobalDefaultError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_directives_take_precedence() {
        let filter = build_filter(Some("warn"), "info").unwrap();
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn blank_env_falls_back_to_level() {
        let filter = build_filter(Some("  "), "debug").unwrap();
        assert_eq!(filter.to_string(), "debug");

        let filter = build_filter(None, "info").unwrap();
        assert_eq!(filter.to_string(), "info");
    }
}
