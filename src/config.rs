//! # Configuration
//!
//! Startup configuration read from the environment. The API base URL and
//! image-store identifiers are required; constructing any service
//! without them is impossible, so a missing variable fails fast at boot
//! instead of at the first upload.

use thiserror::Error;

/// Environment variable holding the REST base URL.
pub const API_BASE_URL_VAR: &str = "FORECOURT_API_BASE_URL";

/// Environment variable holding the image store cloud name.
pub const IMAGE_CLOUD_VAR: &str = "FORECOURT_IMAGE_CLOUD";

/// Environment variable holding the image store upload preset.
pub const UPLOAD_PRESET_VAR: &str = "FORECOURT_UPLOAD_PRESET";

/// Environment variable overriding the session cookie name.
pub const SESSION_COOKIE_VAR: &str = "FORECOURT_SESSION_COOKIE";

/// Default session cookie name.
pub const DEFAULT_SESSION_COOKIE: &str = "forecourt_session";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub image_cloud: String,
    pub upload_preset: String,
    pub session_cookie: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: require(API_BASE_URL_VAR)?,
            image_cloud: require(IMAGE_CLOUD_VAR)?,
            upload_preset: require(UPLOAD_PRESET_VAR)?,
            session_cookie: std::env::var(SESSION_COOKIE_VAR)
                .unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.to_string()),
        })
    }

    /// Upload endpoint derived from the cloud name.
    pub fn upload_url(&self) -> String {
        format!("https://api.cloudinary.com/v1_1/{}/upload", self.image_cloud)
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}
