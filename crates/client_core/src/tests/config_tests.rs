use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn temp_settings_file(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("event_log_settings_{suffix}.toml"));
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(Path::new("/nonexistent/event_log.toml"), no_env);
    assert_eq!(settings, ClientSettings::default());
    assert_eq!(settings.api_base_url, "http://localhost:8080");
    assert_eq!(settings.submit_reset_delay_ms, 3000);
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        "api_base_url = \"https://events.example.com/api/\"\nsubmit_reset_delay_ms = 1500\n",
    );

    let settings = load_settings_from(&path, no_env);
    assert_eq!(settings.api_base_url, "https://events.example.com/api");
    assert_eq!(settings.submit_reset_delay_ms, 1500);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn env_overrides_file_and_prefixed_key_wins() {
    let path = temp_settings_file("api_base_url = \"http://from-file:8080\"\n");

    let settings = load_settings_from(&path, |key| match key {
        "API_URL" => Some("http://from-env:8080".to_string()),
        "APP__API_BASE_URL" => Some("http://from-app-env:9090".to_string()),
        "APP__SUBMIT_RESET_DELAY_MS" => Some("0".to_string()),
        _ => None,
    });
    assert_eq!(settings.api_base_url, "http://from-app-env:9090");
    assert_eq!(settings.submit_reset_delay(), None);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn malformed_sources_are_ignored() {
    let path = temp_settings_file("this is = = not toml");

    let settings = load_settings_from(&path, |key| match key {
        "APP__SUBMIT_RESET_DELAY_MS" => Some("soon".to_string()),
        "API_URL" => Some("ftp://files.example.com".to_string()),
        _ => None,
    });
    assert_eq!(settings, ClientSettings::default());

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn normalize_trims_and_defaults() {
    assert_eq!(
        normalize_base_url("  http://localhost:8080///  "),
        Ok("http://localhost:8080".to_string())
    );
    assert_eq!(normalize_base_url(""), Ok(DEFAULT_API_BASE_URL.to_string()));
}

#[test]
fn normalize_rejects_relative_and_non_http_urls() {
    assert!(matches!(
        normalize_base_url("localhost:8080/events"),
        Err(ConfigError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        normalize_base_url("not a url"),
        Err(ConfigError::InvalidBaseUrl { .. })
    ));
}
