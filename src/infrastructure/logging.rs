//! Tracing subscriber setup.
//!
//! Grounded in `infrastructure/logging/logger.rs`'s stdout branch, with the
//! file-rotation and secret-scrubbing layers dropped: this crate has no
//! long-running daemon mode that would need log rotation, and nothing in
//! its domain produces attacker-controlled strings worth scrubbing.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Output format for stdout logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Initialise the global tracing subscriber. Call once, at process start.
///
/// The default filter directive comes from `level`; `RUST_LOG` still
/// overrides it per-module, same as the teacher's `EnvFilter::from_env_lossy`.
pub fn init(level: &str, format: LogFormat) {
    let env_filter = EnvFilter::builder().with_default_directive(level.parse().unwrap_or_else(|_| tracing::Level::INFO.into())).from_env_lossy();

    match format {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer().json().with_target(true).with_current_span(true);
            tracing_subscriber::registry().with(env_filter).with(layer).init();
        }
        LogFormat::Pretty => {
            let layer = tracing_subscriber::fmt::layer().pretty().with_target(true);
            tracing_subscriber::registry().with(env_filter).with(layer).init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_known_values() {
        assert_eq!(LogFormat::parse("json"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse("pretty"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("xml"), None);
    }
}
