use crate::models::Settings;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const ENV_SETTINGS_PATH: &str = "NEUROCRYPT_SETTINGS";
const DEFAULT_SETTINGS_PATH: &str = "config/settings.json";

pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Settings file (if any) with environment overrides applied on top.
pub fn load_settings() -> anyhow::Result<Settings> {
    let explicit = std::env::var(ENV_SETTINGS_PATH).ok().map(PathBuf::from);
    let path = explicit
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));

    let mut settings = if path.exists() {
        read_settings_file(&path)?
    } else {
        if explicit.is_some() {
            anyhow::bail!("settings file {} does not exist", path.display());
        }
        Settings::default()
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub fn read_settings_file(path: &Path) -> anyhow::Result<Settings> {
    let content = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&content)?;
    log::info!("Loaded settings from {}", path.display());
    Ok(settings)
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    let trimmed = raw.trim();
    match trimmed.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring invalid value for {}: {:?}", key, trimmed);
            None
        }
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let raw = lookup(key)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            log::warn!("Ignoring invalid value for {}: {:?}", key, other);
            None
        }
    }
}

fn text(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(host) = text(&lookup, "HOST") {
        settings.server.host = host;
    }
    if let Some(port) = parsed(&lookup, "PORT") {
        settings.server.port = port;
    }
    if let Some(url) = text(&lookup, "DATABASE_URL") {
        settings.database.url = url;
    }
    if let Some(key) = text(&lookup, "OPENAI_API_KEY") {
        settings.ai.api_key = key;
    }
    if let Some(base_url) = text(&lookup, "OPENAI_BASE_URL") {
        settings.ai.base_url = base_url;
    }
    if let Some(model) = text(&lookup, "AI_MODEL") {
        settings.ai.model = model;
    }
    if let Some(max_tokens) = parsed(&lookup, "AI_MAX_TOKENS") {
        settings.ai.max_tokens = max_tokens;
    }
    if let Some(temperature) = parsed(&lookup, "AI_TEMPERATURE") {
        settings.ai.temperature = temperature;
    }
    if let Some(timeout) = parsed(&lookup, "AI_TIMEOUT_SECS") {
        settings.ai.timeout_secs = timeout;
    }
    if let Some(enabled) = flag(&lookup, "CACHE_ENABLED") {
        settings.cache.enabled = enabled;
    }
    if let Some(ttl) = parsed(&lookup, "CACHE_TTL") {
        settings.cache.ttl_secs = ttl;
    }
    if let Some(enabled) = flag(&lookup, "ENABLE_AI_SUGGESTIONS") {
        settings.features.todo_suggestions = enabled;
    }
    if let Some(enabled) = flag(&lookup, "ENABLE_JOURNAL_ANALYSIS") {
        settings.features.journal_analysis = enabled;
    }
    if let Some(enabled) = flag(&lookup, "ENABLE_GOAL_TRACKING") {
        settings.features.goal_tracking = enabled;
    }
}

/// File path from a `sqlite://` style URL. Plain paths pass through unchanged.
pub fn database_path(url: &str) -> PathBuf {
    let url = url.trim();
    let Some(rest) = url
        .strip_prefix("sqlite+aiosqlite://")
        .or_else(|| url.strip_prefix("sqlite://"))
    else {
        return PathBuf::from(url.strip_prefix("sqlite:").unwrap_or(url));
    };
    // The empty host leaves one separator slash: sqlite:///rel.db, sqlite:////abs.db
    PathBuf::from(rest.strip_prefix('/').unwrap_or(rest))
}
