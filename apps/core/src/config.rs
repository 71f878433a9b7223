//! Runtime configuration, read from the process environment (after `.env`).

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use validator::Validate;

use crate::error::AppError;
use crate::fs_manager::PortablePathManager;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Log output flavour for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown LOG_FORMAT: {}", other))),
        }
    }
}

/// Origins allowed by the CORS layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    /// Chat-completion credential. `None` disables the generative path.
    pub openai_api_key: Option<String>,
    pub openai_api_base: Url,
    #[validate(length(min = 1))]
    pub openai_model: String,
    /// Value between 0.0 and 2.0.
    #[validate(range(min = 0.0, max = 2.0))]
    pub openai_temperature: f32,
    #[validate(range(min = 1, max = 300))]
    pub llm_timeout_secs: u64,
    pub data_path: PathBuf,
    #[validate(length(min = 1))]
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: AllowedOrigins,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, then validates it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            openai_api_key: value("OPENAI_API_KEY").map(|k| k.trim().to_string()),
            openai_api_base: Url::parse(&value("OPENAI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()))?,
            openai_model: value("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_temperature: parse_or("OPENAI_TEMPERATURE", value("OPENAI_TEMPERATURE"), DEFAULT_TEMPERATURE)?,
            llm_timeout_secs: parse_or("LLM_TIMEOUT_SECS", value("LLM_TIMEOUT_SECS"), DEFAULT_TIMEOUT_SECS)?,
            data_path: value("FURIA_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(PortablePathManager::default_record_path),
            host: value("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", value("PORT"), DEFAULT_PORT)?,
            cors_allowed_origins: AllowedOrigins::parse(&value("CORS_ALLOWED_ORIGINS").unwrap_or_default()),
            log_format: value("LOG_FORMAT")
                .map(|v| v.parse::<LogFormat>())
                .transpose()?
                .unwrap_or(LogFormat::Pretty),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid HOST/PORT {}:{}: {}", self.host, self.port, e)))
    }

    pub fn has_credential(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}
