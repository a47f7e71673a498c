use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global `tracing` subscriber.
///
/// `json` switches the output format; the filter always honors `RUST_LOG`
/// and otherwise defaults to `info`. Never call this more than once per
/// process — `tracing_subscriber::set_global_default` panics on retry.
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt().with_env_filter(filter);
    if json {
        subscriber.json().init();
    } else {
        subscriber.compact().init();
    }
}
