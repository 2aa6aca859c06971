use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "multitex=debug,wgpu_core=warn").
///
/// `fallback_filter` is used when neither `env_filter` nor `RUST_LOG` is set.
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub fallback_filter: String,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            fallback_filter: "info".to_string(),
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let filter = resolve_filter(&config, env.as_deref());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(filter);
        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized (filter: {filter})");
    });
}

/// Picks the active filter: explicit config, then `RUST_LOG`, then the fallback.
fn resolve_filter<'a>(config: &'a LoggingConfig, env: Option<&'a str>) -> &'a str {
    config
        .env_filter
        .as_deref()
        .or(env.filter(|s| !s.trim().is_empty()))
        .unwrap_or(config.fallback_filter.as_str())
}
