//! Tracing subscriber setup for the command-line tool

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter directive used when `RUST_LOG` is unset
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "glyphcompose=warn",
        1 => "glyphcompose=info",
        2 => "glyphcompose=debug",
        _ => "glyphcompose=trace",
    }
}

/// Install a stderr subscriber filtered by `RUST_LOG` or by `verbosity`
///
/// Calling it again after a subscriber is installed does nothing.
pub fn init_tracing(verbosity: u8) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(verbosity).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
