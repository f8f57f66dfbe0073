use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for the application
///
/// `RUST_LOG` takes precedence. Without it the level is `warn`, or `debug`
/// for this crate when `verbose` is set. Output goes to stderr so it never
/// mixes with rendered pages.
pub fn init(verbose: bool) -> Result<(), tracing_subscriber::util::TryInitError> {
    let default_filter = if verbose { "warn,podcastr=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .try_init()
}
