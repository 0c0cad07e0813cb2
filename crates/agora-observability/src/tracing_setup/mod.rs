pub mod spans;

use std::sync::OnceLock;

use agora_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins over `config.log_level` when set. Only the first call
/// installs anything; later calls return whether that first install succeeded.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    *INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let result = if config.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        result.is_ok()
    })
}
