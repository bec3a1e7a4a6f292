//! Logging infrastructure for repairdesk.
//!
//! Structured logging controlled by environment variables.
//!
//! # Environment Variables
//!
//! - `REPAIRDESK_DEBUG=true` or `REPAIRDESK_DEBUG=1` - Enable debug logging
//! - `REPAIRDESK_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `REPAIRDESK_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! use repairdesk_query::logging;
//!
//! // Initialize from the environment (call once at startup)
//! logging::init();
//!
//! // Or with explicit settings, e.g. from a config file
//! logging::init_with("info", "compact");
//! ```
//!
//! Within the crates, use the standard tracing macros:
//!
//! ```rust,ignore
//! debug!(filter = ?filter, "composed search filter");
//! info!(id = %order.id, "repair order created");
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

const TARGETS: &[&str] = &[
    "repairdesk",
    "repairdesk_query",
    "repairdesk_memory",
    "repairdesk_shop",
    "repairdesk_axum",
    "repairdesk_server",
];

/// Check if debug logging is enabled via `REPAIRDESK_DEBUG`.
///
/// Returns `true` if it is set to "true", "1", or "yes" (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("REPAIRDESK_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Normalize a level name, falling back to `default` for unknown input.
pub fn normalize_level(level: &str, default: &'static str) -> &'static str {
    match level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => default,
    }
}

/// Normalize a format name. Unknown formats become "json".
pub fn normalize_format(format: &str) -> &'static str {
    match format.to_lowercase().as_str() {
        "pretty" => "pretty",
        "compact" => "compact",
        _ => "json",
    }
}

/// Get the configured log level from `REPAIRDESK_LOG_LEVEL`.
///
/// Defaults to "debug" if `REPAIRDESK_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let default = if is_debug_enabled() { "debug" } else { "warn" };
    env::var("REPAIRDESK_LOG_LEVEL")
        .map(|level| normalize_level(&level, default))
        .unwrap_or(default)
}

/// Get the configured log format from `REPAIRDESK_LOG_FORMAT`.
///
/// Defaults to "json" for structured logging.
pub fn get_log_format() -> &'static str {
    env::var("REPAIRDESK_LOG_FORMAT")
        .map(|f| normalize_format(&f))
        .unwrap_or("json")
}

/// Build the `EnvFilter` directive string for a level.
pub fn directives(level: &str) -> String {
    let mut out = TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(",tower_http=");
    out.push_str(level);
    out
}

/// Initialize logging from the environment.
///
/// Does nothing unless `REPAIRDESK_DEBUG` or `REPAIRDESK_LOG_LEVEL` is set.
/// Subsequent calls are no-ops.
pub fn init() {
    if !is_debug_enabled() && env::var("REPAIRDESK_LOG_LEVEL").is_err() {
        return;
    }
    init_with(get_log_level(), get_log_format());
}

/// Initialize logging with an explicit level and format.
///
/// Subsequent calls (including [`init`]) are no-ops.
pub fn init_with(level: &str, format: &str) {
    let level = normalize_level(level, "info");
    let format = normalize_format(format);

    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let filter = EnvFilter::try_new(directives(level))
                .unwrap_or_else(|_| EnvFilter::new("warn"));

            let registry = tracing_subscriber::registry().with(filter);
            let installed = match format {
                "json" => registry.with(fmt::layer().json()).try_init(),
                "compact" => registry.with(fmt::layer().compact()).try_init(),
                _ => registry.with(fmt::layer().pretty()).try_init(),
            };

            if installed.is_ok() {
                tracing::info!(level = level, format = format, "repairdesk logging initialized");
            }
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            let _ = (level, format);
        }
    });
}
