//! Structured logging setup.
//!
//! Log level comes from `RUST_LOG`; without it the crate logs at `info`.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_http_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
