use reqwest::header::HeaderValue;
use std::env;
use std::time::Duration;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("{0} contains characters not allowed in an HTTP header")]
    NotHeaderSafe(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub openai_url: String,
    pub openai_key: String,
    pub openai_model: String,
    pub openai_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let openai_key = var("OPENAI_KEY").ok_or(ConfigError::Missing("OPENAI_KEY"))?;
        // The key is only ever sent as a bearer header.
        HeaderValue::from_str(&format!("Bearer {}", openai_key))
            .map_err(|_| ConfigError::NotHeaderSafe("OPENAI_KEY"))?;

        let port = match var("SERVER_PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match var("OPENAI_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "OPENAI_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            host: var("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            openai_url: var("OPENAI_URL").unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string()),
            openai_key,
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
