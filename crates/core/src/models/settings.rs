use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Connection and runtime settings for the dashboard core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Origin of the NFT service (e.g., "http://localhost:5000").
    /// Also used to resolve root-relative image paths.
    pub base_url: String,

    /// Path prefix in front of every endpoint.
    pub api_prefix: String,

    /// Per-request timeout in seconds. Not applied on wasm32, where the
    /// browser owns timeouts.
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            api_prefix: "/api".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Parse settings from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: ClientSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(CoreError::ValidationError(format!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }
        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            return Err(CoreError::ValidationError(format!(
                "api_prefix '{}' must be empty or start with '/'",
                self.api_prefix
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::ValidationError(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn mint_url(&self) -> String {
        self.endpoint("/nft/mint")
    }

    pub fn list_url(&self) -> String {
        self.endpoint("/nft/all")
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url.trim().trim_end_matches('/'),
            self.api_prefix.trim_end_matches('/'),
            path
        )
    }
}
