//! Service configuration read from the environment.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_OCR_ENDPOINT: &str = "https://api.ocr.space/parse/image";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Used when a request does not bring its own key.
    pub ocr_api_key: Option<String>,
    pub ocr_endpoint: String,
    pub ocr_language: String,
    pub ocr_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ocr_api_key: None,
            ocr_endpoint: DEFAULT_OCR_ENDPOINT.to_string(),
            ocr_language: "eng".to_string(),
            ocr_timeout: Duration::from_secs(30),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Build the configuration from environment variables.
    ///
    /// Recognised vars:
    /// - HOST, PORT: listen address (default 0.0.0.0:3000)
    /// - OCR_SPACE_API_KEY: server-side OCR.space key
    /// - OCR_SPACE_ENDPOINT: OCR.space URL
    /// - OCR_LANGUAGE: OCR language code (default "eng")
    /// - OCR_TIMEOUT_SECS: OCR request timeout (default 30)
    /// - MAX_BODY_BYTES: request body limit (default 10 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: number(&var, "PORT")?.unwrap_or(defaults.port),
            ocr_api_key: var("OCR_SPACE_API_KEY"),
            ocr_endpoint: var("OCR_SPACE_ENDPOINT").unwrap_or(defaults.ocr_endpoint),
            ocr_language: var("OCR_LANGUAGE").unwrap_or(defaults.ocr_language),
            ocr_timeout: number(&var, "OCR_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.ocr_timeout),
            max_body_bytes: number(&var, "MAX_BODY_BYTES")?.unwrap_or(defaults.max_body_bytes),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn number<T, F>(var: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = var(name) else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(n) => Ok(Some(n)),
        Err(_) => Err(ConfigError::InvalidNumber { name, value }),
    }
}
