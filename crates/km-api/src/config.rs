use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::{API_URL_ENV, AUTH_URL_ENV, DEFAULT_API_URL, DEFAULT_AUTH_URL, DEFAULT_PAGE_SIZE},
    error::ConfigError,
    paginate::Paginator,
    util::parse_base_url,
};

/// Settings read from `kebabmap.toml`. Every key is optional.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub auth_url: String,
    pub page_size: usize,
    pub log_level: String,
    pub session_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            log_level: "info".to_string(),
            session_path: None,
        }
    }
}

/// Validated base URLs for the two backends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointConfig {
    pub api: Url,
    pub auth: Url,
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");
        let contents = tokio::fs::read_to_string(path).await?;
        Self::parse(&contents)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub async fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path).await {
            Err(ConfigError::ReadError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Replace the endpoint URLs with any values `lookup` provides.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(api_url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_url = api_url;
        }
        if let Some(auth_url) = lookup(AUTH_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.auth_url = auth_url;
        }
        self
    }

    pub fn with_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn endpoints(&self) -> Result<EndpointConfig, ConfigError> {
        let api = parse_base_url(&self.api_url)
            .map_err(|_| ConfigError::InvalidUrl("api", self.api_url.clone()))?;
        let auth = parse_base_url(&self.auth_url)
            .map_err(|_| ConfigError::InvalidUrl("auth", self.auth_url.clone()))?;
        Ok(EndpointConfig { api, auth })
    }

    pub fn paginator(&self) -> Result<Paginator, ConfigError> {
        NonZeroUsize::new(self.page_size)
            .map(Paginator::new)
            .ok_or(ConfigError::ZeroPageSize)
    }
}
