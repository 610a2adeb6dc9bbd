use roster_states::{State, snapshot_clone};
use serde::Deserialize;
use std::any::Any;
use std::env::vars;
use thiserror::Error;
use ustr::Ustr;

/// Origin of the local development backend.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration from environment: {0}")]
    Env(#[from] serde_env::Error),
}

/// Connection settings for the user directory backend.
///
/// The bearer token is injected here once at startup and sent unchanged for
/// the lifetime of the app.
#[derive(Debug, Clone)]
pub struct BusinessConfig {
    pub api_base_url: String,
    pub bearer_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    roster_api_base_url: Option<String>,
    roster_token: Option<String>,
}

impl BusinessConfig {
    pub fn new(base_url: String) -> Self {
        Self {
            api_base_url: base_url,
            bearer_token: None,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Reads `ROSTER_API_BASE_URL` and `ROSTER_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_env::from_iter(vars())?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let api_base_url = raw
            .roster_api_base_url
            .map(|url| url.trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let bearer_token = raw.roster_token.filter(|token| !token.trim().is_empty());

        Self {
            api_base_url,
            bearer_token,
        }
    }

    pub fn api_url(&self) -> Ustr {
        if self.api_base_url.is_empty() {
            Ustr::from("/api")
        } else {
            Ustr::from(&format!("{}/api", self.api_base_url))
        }
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL.to_owned())
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        snapshot_clone(self)
    }
}
