use std::env;
use std::fmt;

use crate::domain::polls::poll::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Clone)]
pub struct Config {
    pub api_port: u16,
    pub frontend_url: Option<String>,
    /// Postgres URL; polls are kept in memory when unset
    pub database_url: Option<String>,
    pub default_page_size: u32,
    pub is_production: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_port: 8888,
            frontend_url: None,
            database_url: None,
            default_page_size: DEFAULT_PAGE_SIZE,
            is_production: false,
        }
    }
}

// DATABASE_URL usually embeds credentials and the config is logged at startup
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_port", &self.api_port)
            .field("frontend_url", &self.frontend_url)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "<redacted>"),
            )
            .field("default_page_size", &self.default_page_size)
            .field("is_production", &self.is_production)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8888);
        let frontend_url = env::var("FRONTEND_URL").ok();
        let database_url = env::var("DATABASE_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let default_page_size = env::var("DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let is_production = matches!(
            env::var("RUST_ENV").ok().as_deref(),
            Some("production") | Some("prod")
        );

        if is_production
            && !frontend_url
                .as_deref()
                .map(|u| u.starts_with("http"))
                .unwrap_or(false)
        {
            anyhow::bail!(
                "FRONTEND_URL must be set to a full origin in production (e.g., https://app.example.com)"
            );
        }

        Ok(Self {
            api_port,
            frontend_url,
            database_url,
            default_page_size,
            is_production,
        })
    }
}
