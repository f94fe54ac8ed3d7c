//! Logging setup utilities for the Watchparty server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the server library, the given binary and `tower_http`
/// (request tracing). It can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "watchparty-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use watchparty_shared::logger::setup_logger;
///
/// setup_logger("watchparty-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Default filter directives used when `RUST_LOG` is not set.
///
/// A binary whose crate name matches the server library gets a single directive.
fn default_filter(binary_name: &str, level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut targets = vec![SERVER_TARGET];
    if binary_target != SERVER_TARGET {
        targets.push(binary_target.as_str());
    }
    targets.push("tower_http");

    targets
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

const SERVER_TARGET: &str = "watchparty_server";
