//! Service configuration from CLI flags and environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored when attached to a terminal.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "contact-server")]
#[command(about = "Contact-form backend for the portfolio desktop")]
pub struct Cli {
    /// Full bind address; overrides --host/--port
    #[arg(long, env = "BIND_ADDR")]
    pub bind: Option<SocketAddr>,

    /// Interface to listen on
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Comma-separated origins allowed to call the API
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// Deployed frontend origin, added to the allow-list
    #[arg(long, env = "FRONTEND_URL")]
    pub frontend_url: Option<String>,

    /// Supabase project URL
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    /// Supabase anon key
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_key: Option<String>,

    /// Table receiving contact rows
    #[arg(long, env = "SUPABASE_TABLE", default_value = "contacts")]
    pub supabase_table: String,

    /// Contact submissions allowed per client per window
    #[arg(long, env = "RATE_LIMIT_MAX", default_value_t = 10)]
    pub rate_limit_max: u32,

    /// Rate-limit window length in seconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECS", default_value_t = 900)]
    pub rate_limit_window_secs: u64,

    /// Key clients by the first X-Forwarded-For entry
    #[arg(long, env = "TRUST_PROXY")]
    pub trust_proxy: bool,

    /// Largest accepted request body
    #[arg(long, env = "BODY_LIMIT_BYTES", default_value_t = 10 * 1024)]
    pub body_limit_bytes: usize,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rate_limit_max must be greater than 0")]
    ZeroRateLimit,
    #[error("rate_limit_window_secs must be greater than 0")]
    ZeroRateLimitWindow,
    #[error("body_limit_bytes must be greater than 0")]
    ZeroBodyLimit,
    #[error("supabase_table must not be empty")]
    EmptySupabaseTable,
}

/// Resolved service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: SocketAddr,
    /// Normalized origins (no trailing slash).
    pub allowed_origins: Vec<String>,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub supabase_table: String,
    pub rate_limit_max: u32,
    pub rate_limit_window: Duration,
    pub trust_proxy: bool,
    pub body_limit_bytes: usize,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3001)),
            allowed_origins: Vec::new(),
            supabase_url: None,
            supabase_key: None,
            supabase_table: "contacts".to_string(),
            rate_limit_max: 10,
            rate_limit_window: Duration::from_secs(15 * 60),
            trust_proxy: false,
            body_limit_bytes: 10 * 1024,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Trims whitespace and trailing slashes so `https://a.dev/` matches the `Origin` header.
pub fn normalize_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from CLI args and environment
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::from_cli(Cli::parse())?)
    }

    /// Resolves and validates parsed CLI arguments.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let mut allowed_origins: Vec<String> = cli
            .allowed_origins
            .iter()
            .chain(cli.frontend_url.iter())
            .map(|o| normalize_origin(o))
            .filter(|o| !o.is_empty())
            .collect();
        allowed_origins.sort();
        allowed_origins.dedup();

        let config = Self {
            bind: cli
                .bind
                .unwrap_or_else(|| SocketAddr::new(cli.host, cli.port)),
            allowed_origins,
            supabase_url: non_empty(cli.supabase_url).map(|u| u.trim_end_matches('/').to_string()),
            supabase_key: non_empty(cli.supabase_key),
            supabase_table: cli.supabase_table.trim().to_string(),
            rate_limit_max: cli.rate_limit_max,
            rate_limit_window: Duration::from_secs(cli.rate_limit_window_secs),
            trust_proxy: cli.trust_proxy,
            body_limit_bytes: cli.body_limit_bytes,
            log_level: cli.log_level,
            log_format: cli.log_format,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_limit_max == 0 {
            return Err(ConfigError::ZeroRateLimit);
        }
        if self.rate_limit_window.is_zero() {
            return Err(ConfigError::ZeroRateLimitWindow);
        }
        if self.body_limit_bytes == 0 {
            return Err(ConfigError::ZeroBodyLimit);
        }
        if self.supabase_table.is_empty() {
            return Err(ConfigError::EmptySupabaseTable);
        }
        Ok(())
    }

    /// Whether both Supabase settings are present.
    pub fn supabase_configured(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_key.is_some()
    }
}
