//! Tracing initialization and subscriber setup.

use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when neither `RUST_LOG` nor the config names one.
const DEFAULT_LEVEL: &str = "warn";

/// Initializes a stderr tracing subscriber.
///
/// Output goes to stderr so stdout stays clean for shell integration (`cd "$(dirrank
/// query foo --first)"`).
///
/// # Level Resolution
///
/// 1. `RUST_LOG`, if set and valid
/// 2. `config.trace_level`, if set
/// 3. `"warn"`
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
        EnvFilter::new(level)
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
