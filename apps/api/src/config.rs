use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Request body limit for uploads and JSON documents.
    pub max_upload_bytes: usize,
    pub render_max_pages: usize,
}

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
pub const DEFAULT_RENDER_MAX_PAGES: usize = 50;

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            render_max_pages: DEFAULT_RENDER_MAX_PAGES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let config = Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            render_max_pages: parse_env("RENDER_MAX_PAGES", defaults.render_max_pages)?,
        };
        if config.render_max_pages == 0 {
            anyhow::bail!("RENDER_MAX_PAGES must be at least 1");
        }
        Ok(config)
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
