//! Domain types and validators for dockyard configuration.
//!
//! Pure functions only; the YAML file is handled in `infra::config`.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "desktop.auto_start",
    "desktop.start_minimized",
    "desktop.close_to_tray",
    "engine.disk_gb",
    "engine.memory_gb",
    "engine.cpus",
    "engine.registry_mirror",
    "engine.experimental",
    "engine.buildkit",
    "assistant.endpoint",
    "assistant.model",
    "tools.package_manager",
    "tools.container_engine",
];

const BOOL_VALUES: &str = "true, false";

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.dockyard/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DockyardConfig {
    pub desktop: DesktopConfig,
    pub engine: EngineConfig,
    pub assistant: AssistantConfig,
    pub tools: ToolsConfig,
}

/// Window behaviour flags kept for the desktop shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DesktopConfig {
    pub auto_start: bool,
    pub start_minimized: bool,
    pub close_to_tray: bool,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            auto_start: false,
            start_minimized: false,
            close_to_tray: true,
        }
    }
}

/// Container engine resource preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    pub disk_gb: u32,
    pub memory_gb: u32,
    pub cpus: u32,
    pub registry_mirror: String,
    pub experimental: bool,
    pub buildkit: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            disk_gb: 64,
            memory_gb: 4,
            cpus: 2,
            registry_mirror: String::new(),
            experimental: false,
            buildkit: true,
        }
    }
}

/// Remote completion API settings. The API key comes from the environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssistantConfig {
    pub endpoint: String,
    pub model: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// External programs dockyard drives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolsConfig {
    pub package_manager: String,
    pub container_engine: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            package_manager: "scoop".to_string(),
            container_engine: "docker".to_string(),
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

fn invalid(key: &str, value: &str, valid: &str) -> anyhow::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid: valid.to_string(),
    }
    .into()
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(key, value, BOOL_VALUES)),
    }
}

fn parse_range(key: &str, value: &str, min: u32, max: u32) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(n) if (min..=max).contains(&n) => Ok(n),
        _ => Err(invalid(key, value, &format!("integer {min}-{max}"))),
    }
}

fn parse_url(key: &str, value: &str, allow_empty: bool) -> Result<String> {
    if (allow_empty && value.is_empty())
        || value.starts_with("https://")
        || value.starts_with("http://")
    {
        return Ok(value.to_string());
    }
    Err(invalid(key, value, "http:// or https:// URL"))
}

fn parse_program(key: &str, value: &str) -> Result<String> {
    let ok = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '\\' | ':'));
    if ok {
        Ok(value.to_string())
    } else {
        Err(invalid(key, value, "program name or path without spaces"))
    }
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let mut scratch = DockyardConfig::default();
    apply_config_value(&mut scratch, key, value)
}

/// Validate `value` and store it under `key`.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value is invalid for it.
pub fn apply_config_value(config: &mut DockyardConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    match key {
        "desktop.auto_start" => config.desktop.auto_start = parse_bool(key, value)?,
        "desktop.start_minimized" => config.desktop.start_minimized = parse_bool(key, value)?,
        "desktop.close_to_tray" => config.desktop.close_to_tray = parse_bool(key, value)?,
        "engine.disk_gb" => config.engine.disk_gb = parse_range(key, value, 8, 2048)?,
        "engine.memory_gb" => config.engine.memory_gb = parse_range(key, value, 1, 256)?,
        "engine.cpus" => config.engine.cpus = parse_range(key, value, 1, 128)?,
        "engine.registry_mirror" => config.engine.registry_mirror = parse_url(key, value, true)?,
        "engine.experimental" => config.engine.experimental = parse_bool(key, value)?,
        "engine.buildkit" => config.engine.buildkit = parse_bool(key, value)?,
        "assistant.endpoint" => config.assistant.endpoint = parse_url(key, value, false)?,
        "assistant.model" => {
            if value.trim().is_empty() {
                return Err(invalid(key, value, "non-empty model name"));
            }
            config.assistant.model = value.trim().to_string();
        }
        "tools.package_manager" => config.tools.package_manager = parse_program(key, value)?,
        "tools.container_engine" => config.tools.container_engine = parse_program(key, value)?,
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
