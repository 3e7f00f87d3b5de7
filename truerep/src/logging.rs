//! Tracing subscriber setup.

use anyhow::Result;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info";

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `info`.
pub fn init(format: LogFormat) -> Result<()> {
    let raw = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (env_filter, filter_error) = parse_filter(raw.as_deref());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    let installed = match format {
        LogFormat::Pretty => subscriber.try_init(),
        LogFormat::Json => subscriber.json().try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    if let Some(error) = filter_error {
        warn!(%error, fallback = DEFAULT_FILTER, "RUST_LOG is not a valid tracing filter");
    }
    Ok(())
}

/// Build the filter from a `RUST_LOG` value, returning the parse error when
/// the value had to be replaced by the default.
fn parse_filter(raw: Option<&str>) -> (EnvFilter, Option<String>) {
    match raw {
        None => (EnvFilter::new(DEFAULT_FILTER), None),
        Some(directives) => match EnvFilter::try_new(directives) {
            Ok(filter) => (filter, None),
            Err(e) => (EnvFilter::new(DEFAULT_FILTER), Some(e.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_defaults_when_unset() {
        let (filter, error) = parse_filter(None);
        assert_eq!(filter.to_string(), DEFAULT_FILTER);
        assert!(error.is_none());
    }

    #[test]
    fn test_parse_filter_accepts_directives() {
        let (_, error) = parse_filter(Some("truerep=debug,tower_http=warn"));
        assert!(error.is_none());
    }

    #[test]
    fn test_parse_filter_reports_invalid_value() {
        let (filter, error) = parse_filter(Some("truerep=loud"));
        assert_eq!(filter.to_string(), DEFAULT_FILTER);
        assert!(error.is_some());
    }
}
