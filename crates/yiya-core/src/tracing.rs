use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset: service logs at info, SQL chatter at warn.
pub const DEFAULT_FILTER: &str = "info,sqlx=warn,sea_orm=warn";

/// Install the JSON stdout subscriber and tag the first event with `service`.
///
/// Later calls are ignored, so tests may call it freely.
pub fn init_tracing(service: &'static str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_current_span(false))
        .try_init()
        .is_ok();
    if installed {
        ::tracing::info!(service, version = env!("CARGO_PKG_VERSION"), "tracing initialized");
    }
}
