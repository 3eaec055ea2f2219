use crate::errors::{BrowserError, BrowserResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_API_BASE_URL: &str = "https://tyradex.vercel.app/api/v1";
pub const API_URL_ENV: &str = "POKEDEX_API_URL";

/// Where and how the browser talks to the remote index.
///
/// Loaded from an optional RON file, e.g.
///
/// ```ron
/// (
///     api_base_url: "https://tyradex.vercel.app/api/v1",
///     user_agent: "pokedex-browser/0.1",
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub api_base_url: String,
    pub user_agent: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl BrowserConfig {
    pub fn from_ron_str(contents: &str) -> BrowserResult<Self> {
        ron::from_str::<BrowserConfig>(contents)
            .map_err(|e| BrowserError::Config(format!("Failed to parse config: {}", e)))?
            .validated()
    }

    pub fn from_file(path: &Path) -> BrowserResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            BrowserError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_ron_str(&contents)
    }

    /// Resolves the effective configuration.
    ///
    /// Precedence, lowest to highest: defaults, the RON file at `path`, the
    /// `POKEDEX_API_URL` environment variable, then `api_url_override`.
    pub fn load(path: Option<&Path>, api_url_override: Option<&str>) -> BrowserResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api_base_url = url;
        }
        if let Some(url) = api_url_override {
            config.api_base_url = url.to_string();
        }

        config.validated()
    }

    fn validated(mut self) -> BrowserResult<Self> {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(BrowserError::Config("api_base_url must not be empty".to_string()));
        }
        self.api_base_url = trimmed.to_string();
        Ok(self)
    }

    /// `GET` target for the full index.
    pub fn list_url(&self) -> String {
        format!("{}/pokemon", self.api_base_url)
    }

    /// `GET` target for a single record.
    pub fn record_url(&self, id: schema::RecordId) -> String {
        format!("{}/pokemon/{}", self.api_base_url, id)
    }
}
