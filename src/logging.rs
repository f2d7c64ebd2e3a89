//! # Tracing Module
//!
//! Environment-aware console logging using the tracing ecosystem. The host
//! application normally owns the global subscriber; [`init_tracing`] is for
//! hosts and tools that do not, and is safe to call more than once.
//!
//! Level selection: `RUST_LOG` when set, otherwise a default derived from
//! `METRIC_FIND_ENV` (`production` logs at info, everything else at debug). Set `METRIC_FIND_LOG_FORMAT=json` for JSON lines.

use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize console logging once per process
pub fn init_tracing() {
    TRACING_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);
        let use_json = get_log_format().as_deref() == Some("json");
        let use_ansi = IsTerminal::is_terminal(&std::io::stdout());

        let console_layer = if use_json {
            fmt::layer()
                .json()
                .with_target(true)
                .with_level(true)
                .with_filter(EnvFilter::new(&log_level))
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(use_ansi)
                .with_filter(EnvFilter::new(&log_level))
                .boxed()
        };

        if tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .is_err()
        {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        } else {
            tracing::info!(
                environment = %environment,
                log_level = %log_level,
                json = use_json,
                ansi_colors = use_ansi,
                "Console logging initialized"
            );
        }
    });
}

fn get_environment() -> String {
    std::env::var("METRIC_FIND_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

fn get_log_level(environment: &str) -> String {
    resolve_log_level(std::env::var("RUST_LOG").ok(), environment)
}

fn resolve_log_level(rust_log: Option<String>, environment: &str) -> String {
    match rust_log {
        Some(level) if !level.trim().is_empty() => level.to_lowercase(),
        _ => default_level_for(environment).to_string(),
    }
}

fn default_level_for(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

fn get_log_format() -> Option<String> {
    std::env::var("METRIC_FIND_LOG_FORMAT")
        .ok()
        .map(|format| format.to_lowercase())
}

/// Structured log line for a variable query
///
/// ```
/// use metric_find_query::log_query;
///
/// log_query!(debug, "dispatch", query_type: "projects");
/// ```
#[macro_export]
macro_rules! log_query {
    ($level:ident, $operation:expr, query_type: $query_type:expr, $($key:ident: $value:expr),* $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            query_type = %$query_type,
            $($key = %$value,)*
            "METRIC_FIND {}", $operation
        );
    };
    ($level:ident, $operation:expr, query_type: $query_type:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            query_type = %$query_type,
            "METRIC_FIND {}", $operation
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_for_environment() {
        assert_eq!(default_level_for("production"), "info");
        assert_eq!(default_level_for("test"), "debug");
        assert_eq!(default_level_for("development"), "debug");
        assert_eq!(default_level_for("staging"), "debug");
    }

    #[test]
    fn test_rust_log_overrides_environment_default() {
        assert_eq!(
            resolve_log_level(Some("WARN".to_string()), "production"),
            "warn"
        );
        assert_eq!(
            resolve_log_level(Some("metric_find_query=trace".to_string()), "development"),
            "metric_find_query=trace"
        );
    }

    #[test]
    fn test_missing_rust_log_falls_back_to_environment() {
        assert_eq!(resolve_log_level(None, "production"), "info");
        assert_eq!(resolve_log_level(None, "development"), "debug");
        assert_eq!(resolve_log_level(Some("  ".to_string()), "production"), "info");
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
        assert!(TRACING_INITIALIZED.get().is_some());
    }
}
