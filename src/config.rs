//! Startup configuration.
//!
//! The backend base URL is resolved once, before the UI launches, and every
//! panel reads the same value afterwards.

use anyhow::{Context, Result, bail};
use once_cell::sync::OnceCell;
use reqwest::Url;
use std::env;
use std::str::FromStr;
use tracing::Level;

pub const API_URL_VAR: &str = "BIKEHERO_API_URL";
pub const LOG_LEVEL_VAR: &str = "BIKEHERO_LOG";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

const CHAT_PATH: &str = "chat/";
const HISTORY_PATH: &str = "chat/history/";

static API_CONFIG: OnceCell<ApiConfig> = OnceCell::new();

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    chat_url: Url,
    history_url: Url,
}

impl ApiConfig {
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let mut base_url =
            Url::parse(trimmed).with_context(|| format!("invalid backend URL `{trimmed}`"))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            bail!("backend URL `{trimmed}` must use http or https");
        }
        // Url::join replaces the last segment unless the path ends in a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let chat_url = base_url
            .join(CHAT_PATH)
            .context("building chat endpoint")?;
        let history_url = base_url
            .join(HISTORY_PATH)
            .context("building history endpoint")?;
        Ok(Self {
            base_url,
            chat_url,
            history_url,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve from any key/value source; an unset or blank URL means the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        match lookup(API_URL_VAR).filter(|value| !value.trim().is_empty()) {
            Some(raw) => Self::new(&raw).with_context(|| format!("reading {API_URL_VAR}")),
            None => Self::new(DEFAULT_API_URL),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn chat_url(&self) -> &Url {
        &self.chat_url
    }

    pub fn history_url(&self) -> &Url {
        &self.history_url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL).expect("default backend URL is valid")
    }
}

/// Store the configuration for the rest of the process. Returns `false` if one
/// was already installed.
pub fn install(config: ApiConfig) -> bool {
    API_CONFIG.set(config).is_ok()
}

/// The installed configuration, or one resolved from the environment on first use.
pub fn current() -> ApiConfig {
    API_CONFIG
        .get_or_init(|| {
            ApiConfig::from_env().unwrap_or_else(|err| {
                tracing::warn!("{err:#}; using {DEFAULT_API_URL}");
                ApiConfig::default()
            })
        })
        .clone()
}

pub fn log_level(lookup: impl Fn(&str) -> Option<String>) -> Level {
    lookup(LOG_LEVEL_VAR)
        .and_then(|value| Level::from_str(value.trim()).ok())
        .unwrap_or(Level::INFO)
}

/// Layer a dotenv-style document under another source. Keys the primary
/// source lacks are read from `bundled`.
pub fn with_bundled<'a>(
    primary: impl Fn(&str) -> Option<String> + 'a,
    bundled: &'a str,
) -> impl Fn(&str) -> Option<String> + 'a {
    move |key: &str| {
        primary(key).or_else(|| {
            env_pairs(bundled)
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        })
    }
}

/// `KEY=VALUE` pairs from a dotenv-style document, skipping blanks and comments.
pub fn env_pairs(source: &str) -> impl Iterator<Item = (&str, &str)> {
    source.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key, value.trim()))
    })
}
