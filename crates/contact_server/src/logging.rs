use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::{Config, LogFormat};

/// Initialize logging and tracing subsystem
pub fn init(config: &Config) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true)
                .with_file(true)
                .with_line_number(true);
            Registry::default()
                .with(env_filter)
                .with(json_layer)
                .try_init()?;
        }
        LogFormat::Pretty => {
            Registry::default()
                .with(env_filter)
                .with(fmt::layer().with_target(true))
                .try_init()?;
        }
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "contact server starting"
    );

    Ok(())
}

/// Log configuration (without sensitive data)
pub fn log_config(config: &Config) {
    tracing::info!(
        bind = %config.bind,
        allowed_origins = ?config.allowed_origins,
        supabase_url = config.supabase_url.as_deref().unwrap_or("-"),
        supabase_key_set = config.supabase_key.is_some(),
        supabase_table = %config.supabase_table,
        rate_limit_max = config.rate_limit_max,
        rate_limit_window_secs = config.rate_limit_window.as_secs(),
        trust_proxy = config.trust_proxy,
        body_limit_bytes = config.body_limit_bytes,
        "service configuration loaded"
    );
}
