use std::{collections::HashMap, fs, path::Path, time::Duration};

use thiserror::Error;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_SUBMIT_RESET_DELAY_MS: u64 = 3000;
pub const SETTINGS_FILE: &str = "event_log.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    /// `0` turns the automatic submit-status reset off.
    pub submit_reset_delay_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            submit_reset_delay_ms: DEFAULT_SUBMIT_RESET_DELAY_MS,
        }
    }
}

impl ClientSettings {
    pub fn submit_reset_delay(&self) -> Option<Duration> {
        (self.submit_reset_delay_ms > 0).then(|| Duration::from_millis(self.submit_reset_delay_ms))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Defaults, then `event_log.toml` in the working directory, then environment.
/// Unreadable or invalid sources are skipped with a warning.
pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => apply_file_settings(&mut settings, &file_cfg),
            Err(error) => warn!(path = %path.display(), %error, "ignoring malformed settings file"),
        }
    }

    if let Some(v) = env("API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__SUBMIT_RESET_DELAY_MS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.submit_reset_delay_ms = parsed,
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__SUBMIT_RESET_DELAY_MS"),
        }
    }

    match normalize_base_url(&settings.api_base_url) {
        Ok(url) => settings.api_base_url = url,
        Err(error) => {
            warn!(%error, "falling back to default API base URL");
            settings.api_base_url = DEFAULT_API_BASE_URL.into();
        }
    }

    settings
}

fn apply_file_settings(settings: &mut ClientSettings, file_cfg: &HashMap<String, toml::Value>) {
    if let Some(v) = file_cfg.get("api_base_url").and_then(toml::Value::as_str) {
        settings.api_base_url = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("submit_reset_delay_ms")
        .and_then(toml::Value::as_integer)
        .and_then(|v| u64::try_from(v).ok())
    {
        settings.submit_reset_delay_ms = v;
    }
}

/// Trims whitespace and trailing slashes; blank input yields the default URL.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_API_BASE_URL.into());
    }

    let parsed = Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
