use crate::cli::Args;
use crate::services::source::DEFAULT_BASE_URL;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API base URL {0:?}: {1}")]
    InvalidBaseUrl(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub page_size: usize,
    pub max_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            page_size: 20,
            max_page_size: 250,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            api_base_url: env::var("RESTCOUNTRIES_BASE_URL").unwrap_or(defaults.api_base_url),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            page_size: parse_var("PAGE_SIZE", defaults.page_size),
            max_page_size: parse_var("MAX_PAGE_SIZE", defaults.max_page_size),
        };

        config.validate()?;
        Ok(config)
    }

    /// Command-line flags take precedence over the environment.
    pub fn apply_args(mut self, args: &Args) -> Result<Self, ConfigError> {
        if let Some(port) = args.port {
            self.server_port = port;
        }
        if let Some(url) = &args.api_base_url {
            self.api_base_url = url.clone();
        }
        if let Some(secs) = args.timeout_secs {
            self.request_timeout_secs = secs;
        }
        if let Some(size) = args.page_size {
            self.page_size = size;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.api_base_url)
            .map_err(|e| ConfigError::InvalidBaseUrl(self.api_base_url.clone(), e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(
                self.api_base_url.clone(),
                "scheme must be http or https".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
