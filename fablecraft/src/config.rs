//! Application configuration loaded from environment variables.

use crate::context::ContextPolicy;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Primary API key variable.
pub const API_KEY_VAR: &str = "api_key";
/// Fallback API key variable.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Model override.
pub const MODEL_VAR: &str = "FABLECRAFT_MODEL";
/// Endpoint root override.
pub const BASE_URL_VAR: &str = "FABLECRAFT_BASE_URL";
/// Sampling temperature.
pub const TEMPERATURE_VAR: &str = "FABLECRAFT_TEMPERATURE";
/// Listen address.
pub const BIND_VAR: &str = "FABLECRAFT_BIND";
/// Background image path.
pub const BACKGROUND_VAR: &str = "FABLECRAFT_BACKGROUND";
/// Context policy selector.
pub const CONTEXT_POLICY_VAR: &str = "FABLECRAFT_CONTEXT_POLICY";

/// Runtime settings for the outline service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the text-generation service.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Model name, optionally prefixed with `gemini/`.
    #[serde(default = "default_model")]
    pub model: String,
    /// Endpoint root for the text-generation service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sampling temperature; provider default when unset.
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Socket address the web server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// JPEG used as the page background.
    #[serde(default = "default_background_image")]
    pub background_image: PathBuf,
    /// Prior-output visibility between stages.
    #[serde(default)]
    pub context_policy: ContextPolicy,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:7860".to_string()
}

fn default_background_image() -> PathBuf {
    PathBuf::from("fantasy.jpeg")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: None,
            bind_addr: default_bind_addr(),
            background_image: default_background_image(),
            context_policy: ContextPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset. `api_key` takes precedence over
    /// `GEMINI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.api_key = get(API_KEY_VAR).or_else(|| get(GEMINI_API_KEY_VAR));
        if let Some(model) = get(MODEL_VAR) {
            config.model = model;
        }
        if let Some(base_url) = get(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        if let Some(raw) = get(TEMPERATURE_VAR) {
            let temperature = raw.trim().parse::<f32>().map_err(|_| ConfigError::InvalidValue {
                key: TEMPERATURE_VAR.to_string(),
                value: raw.clone(),
            })?;
            config.temperature = Some(temperature);
        }
        if let Some(bind_addr) = get(BIND_VAR) {
            config.bind_addr = bind_addr;
        }
        if let Some(path) = get(BACKGROUND_VAR) {
            config.background_image = PathBuf::from(path);
        }
        if let Some(raw) = get(CONTEXT_POLICY_VAR) {
            config.context_policy = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: CONTEXT_POLICY_VAR.to_string(),
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the bind address.
    #[must_use]
    pub fn with_bind_addr(mut self, bind_addr: impl Into<String>) -> Self {
        self.bind_addr = bind_addr.into();
        self
    }

    /// Sets the background image path.
    #[must_use]
    pub fn with_background_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.background_image = path.into();
        self
    }

    /// Sets the context policy.
    #[must_use]
    pub fn with_context_policy(mut self, policy: ContextPolicy) -> Self {
        self.context_policy = policy;
        self
    }

    /// Returns true if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Builds the Gemini client settings.
    #[cfg(feature = "gemini")]
    #[must_use]
    pub fn gemini_config(&self) -> crate::providers::GeminiConfig {
        let mut gemini = crate::providers::GeminiConfig::default()
            .with_model(self.model.clone())
            .with_base_url(self.base_url.clone());
        gemini.api_key.clone_from(&self.api_key);
        gemini.temperature = self.temperature;
        gemini
    }
}
