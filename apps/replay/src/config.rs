use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "ui_replay.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub log_filter: String,
    pub pretty: bool,
    pub emit_each_step: bool,
    pub state_path: Option<PathBuf>,
    pub events_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            pretty: false,
            emit_each_step: false,
            state_path: None,
            events_path: None,
        }
    }
}

/// File layer first, then env overrides. A missing file is not an error.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(raw) => apply_file_layer(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if config_path.is_some() => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env_layer(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

fn apply_file_layer(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(raw)?;

    if let Some(v) = file_cfg.get("log_filter").and_then(toml::Value::as_str) {
        settings.log_filter = v.to_string();
    }
    if let Some(v) = file_cfg.get("pretty").and_then(toml::Value::as_bool) {
        settings.pretty = v;
    }
    if let Some(v) = file_cfg.get("emit_each_step").and_then(toml::Value::as_bool) {
        settings.emit_each_step = v;
    }
    if let Some(v) = file_cfg.get("state_path").and_then(toml::Value::as_str) {
        settings.state_path = Some(PathBuf::from(v));
    }
    if let Some(v) = file_cfg.get("events_path").and_then(toml::Value::as_str) {
        settings.events_path = Some(PathBuf::from(v));
    }

    Ok(())
}

fn apply_env_layer(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = lookup("UI_REPLAY_PRETTY").and_then(|v| parse_flag(&v)) {
        settings.pretty = v;
    }
    if let Some(v) = lookup("UI_REPLAY_EACH_STEP").and_then(|v| parse_flag(&v)) {
        settings.emit_each_step = v;
    }

    if let Some(v) = lookup("UI_REPLAY_STATE") {
        settings.state_path = Some(PathBuf::from(v));
    }
    if let Some(v) = lookup("UI_REPLAY_EVENTS") {
        settings.events_path = Some(PathBuf::from(v));
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
