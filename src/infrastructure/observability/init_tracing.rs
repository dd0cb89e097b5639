use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use super::{Environment, TracingConfig};

/// Installs the global tracing subscriber. `RUST_LOG` wins when set;
/// otherwise the default filter depends on the runtime environment.
pub fn init_tracing(config: TracingConfig, port: u16) {
    let default_filter = match config.environment {
        Environment::Prod => "info,scribe=info",
        Environment::Local | Environment::Test => "info,scribe=debug,tower_http=debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);
    let fmt_layer = if config.json_format {
        fmt_layer.json().boxed()
    } else {
        fmt_layer.boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!(
        port,
        environment = %config.environment,
        json_format = config.json_format,
        "Server initialized"
    );
}
