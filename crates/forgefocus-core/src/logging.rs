//! Tracing bootstrap shared by the binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "FORGEFOCUS_LOG";

/// Install a stderr `fmt` subscriber filtered by `FORGEFOCUS_LOG`,
/// falling back to `default_directive` (e.g. `"forgefocus=warn"`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init(default_directive: &str) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
