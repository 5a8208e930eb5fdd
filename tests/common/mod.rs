//! Shared utilities for the integration tests.

use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static TRACING: Once = Once::new();

/// Initialize the tracing subscriber once per test binary so gate and
/// executor log lines show up under `--nocapture`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "gatekey=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}
