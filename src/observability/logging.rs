//! Structured logging initialization.
//!
//! # Responsibilities
//! - Build the process-wide tracing subscriber
//! - Apply the configured default level, overridable via RUST_LOG
//!
//! # Design Decisions
//! - One subscriber installed at startup; handlers log through `tracing`
//!   targets (the diagnostic endpoints use their own named channel)
//! - RUST_LOG wins over the config file when set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `default_level` applies to this crate and the diagnostics channel when
/// `RUST_LOG` is not set. Panics if a subscriber is already installed,
/// which only happens when called twice.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "chat_relay={default_level},diagnostics={default_level},tower_http=info"
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
