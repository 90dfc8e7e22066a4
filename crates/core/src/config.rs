//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the provider and store
//! clients. Request handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_GROQ_BASE_URL, DEFAULT_GROQ_MODEL, DEFAULT_HTTP_TIMEOUT_SECS};
use crate::error::ConfigError;
use std::fmt;
use std::time::Duration;

pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const GROQ_MODEL: &str = "GROQ_MODEL";
pub const GROQ_BASE_URL: &str = "GROQ_BASE_URL";
pub const SUPABASE_URL: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const HTTP_TIMEOUT_SECS: &str = "TFLOW_HTTP_TIMEOUT_SECS";

/// Environment variables that must be present at startup.
pub const REQUIRED_VARS: [&str; 3] = [GROQ_API_KEY, SUPABASE_URL, SUPABASE_ANON_KEY];

/// Settings for the language-model provider client.
#[derive(Clone)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

/// Settings for the record store client.
#[derive(Clone)]
pub struct StoreSettings {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

// Keys are never printed.
impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl fmt::Debug for StoreSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSettings")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    provider: ProviderSettings,
    store: StoreSettings,
}

impl CoreConfig {
    pub fn new(provider: ProviderSettings, store: StoreSettings) -> Self {
        Self { provider, store }
    }

    /// Builds the configuration from a key lookup, typically `|k| std::env::var(k).ok()`.
    ///
    /// Blank values are treated as missing.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `GROQ_API_KEY`, `SUPABASE_URL` or `SUPABASE_ANON_KEY` is missing,
    /// - `SUPABASE_URL` or `GROQ_BASE_URL` is not an http(s) URL,
    /// - `TFLOW_HTTP_TIMEOUT_SECS` is not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let groq_api_key = require(GROQ_API_KEY)?;
        let supabase_url = require(SUPABASE_URL)?;
        let supabase_key = require(SUPABASE_ANON_KEY)?;

        let timeout = match get(HTTP_TIMEOUT_SECS) {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let base_url = get(GROQ_BASE_URL).unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.into());

        Ok(Self {
            provider: ProviderSettings {
                api_key: groq_api_key,
                base_url: validate_http_url(GROQ_BASE_URL, base_url)?,
                model: get(GROQ_MODEL).unwrap_or_else(|| DEFAULT_GROQ_MODEL.into()),
                timeout,
            },
            store: StoreSettings {
                url: validate_http_url(SUPABASE_URL, supabase_url)?,
                api_key: supabase_key,
                timeout,
            },
        })
    }

    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`CoreConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn provider(&self) -> &ProviderSettings {
        &self.provider
    }

    pub fn store(&self) -> &StoreSettings {
        &self.store
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid {
            key: HTTP_TIMEOUT_SECS,
            reason: format!("expected a positive number of seconds, got {raw:?}"),
        }),
    }
}

/// Checks the scheme and strips any trailing slash.
fn validate_http_url(key: &'static str, url: String) -> Result<String, ConfigError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            key,
            reason: "must start with http:// or https://".into(),
        });
    }
    Ok(url.trim_end_matches('/').to_string())
}

/// Masks a secret for display, keeping only its last four characters.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(10), tail)
}
