use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{fmt, prelude::__tracing_subscriber_SubscriberExt, EnvFilter, Registry};

/// Installs the global tracing subscriber, printing events to stdout.
///
/// the verbosity is read from `RUST_LOG`, falling back to `info` for this
/// crate and `warn` for everything else
pub fn init(service_name: &str) -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,blog_api=info,tower_http=info"));

    let subscriber = Registry::default()
        .with(filter)
        .with(fmt::layer().with_target(false));

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!("[TRACER] initialized for {}", service_name);
    Ok(())
}
