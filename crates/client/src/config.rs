use std::path::PathBuf;

use reqwest::Url;

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const API_URL_VAR: &str = "BUGTRACK_API_URL";

/// Client settings. The API URL comes from `--api-url`, then
/// `BUGTRACK_API_URL`, then [`DEFAULT_API_URL`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    /// Where the session token is kept; `None` when the platform has no
    /// config directory.
    pub token_path: Option<PathBuf>,
}

impl ClientConfig {
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let api_url = lookup(API_URL_VAR)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_url: normalize_base_url(&api_url)?,
            token_path: default_token_path(),
        })
    }

    pub fn with_api_url(mut self, api_url: &str) -> ClientResult<Self> {
        self.api_url = normalize_base_url(api_url)?;
        Ok(self)
    }
}

/// `<config dir>/bugtrack/token`
pub fn default_token_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bugtrack").join("token"))
}

/// Trim and drop trailing slashes. Only absolute `http`/`https` URLs are
/// accepted.
fn normalize_base_url(url: &str) -> ClientResult<String> {
    let url = url.trim().trim_end_matches('/');
    let parsed = Url::parse(url)
        .map_err(|e| ClientError::Config(format!("invalid API URL '{url}': {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(url.to_string()),
        scheme => Err(ClientError::Config(format!(
            "API URL '{url}' must use http or https, not '{scheme}'"
        ))),
    }
}
