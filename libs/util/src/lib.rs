use std::path::Path;

use anyhow::Context;
use toml::{map::Map, Value};

/// Reads a TOML file into a table. A missing file yields an empty table so
/// that every key falls back to its default.
pub fn load_config(path: &Path) -> anyhow::Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }

    let config = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str::<Map<String, Value>>(&config)
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Looks a secret up in the environment first, then in the secrets table.
pub fn load_env(secrets: &Map<String, Value>, key: &str) -> Option<String> {
    if let Ok(value) = std::env::var(key) {
        if !value.is_empty() {
            return Some(value);
        }
    }

    secrets
        .get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
}
