//! Log output for model loading and evaluation events.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes `tracing` output to stderr.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default `cflp_model=info` filter, e.g.
/// `RUST_LOG=cflp_model=trace` prints every evaluation.
pub fn init_logging() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("cflp_model=info"));

        // Another subscriber may already be installed by the host program.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init();
    });
}
