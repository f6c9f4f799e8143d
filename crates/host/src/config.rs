use std::{collections::HashMap, fs, path::Path, time::Duration};

use serde::Deserialize;
use session::SessionOptions;

pub const SETTINGS_FILE: &str = "loom.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub bind_host: String,
    pub port_start: u16,
    pub port_end: u16,
    pub drain_timeout_ms: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_host: "127.0.0.1".into(),
            port_start: 7072,
            port_end: 65535,
            drain_timeout_ms: 500,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            drain_timeout: Duration::from_millis(self.drain_timeout_ms),
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, env);
    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        return;
    };
    let get = |key: &str| file_cfg.get(key).and_then(scalar);

    if let Some(v) = get("bind_host") {
        settings.bind_host = v;
    }
    if let Some(v) = get("port_start").and_then(|v| v.parse().ok()) {
        settings.port_start = v;
    }
    if let Some(v) = get("port_end").and_then(|v| v.parse().ok()) {
        settings.port_end = v;
    }
    if let Some(v) = get("drain_timeout_ms").and_then(|v| v.parse().ok()) {
        settings.drain_timeout_ms = v;
    }
    if let Some(v) = get("log_filter") {
        settings.log_filter = v;
    }
}

fn apply_env(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("LOOM_BIND_HOST") {
        settings.bind_host = v;
    }
    if let Some(v) = env("APP__BIND_HOST") {
        settings.bind_host = v;
    }

    if let Some(v) = env("APP__PORT_START").and_then(|v| v.parse().ok()) {
        settings.port_start = v;
    }
    if let Some(v) = env("APP__PORT_END").and_then(|v| v.parse().ok()) {
        settings.port_end = v;
    }

    if let Some(v) = env("APP__DRAIN_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
        settings.drain_timeout_ms = v;
    }

    if let Some(v) = env("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

fn scalar(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
