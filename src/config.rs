//! User settings in `config.json` (get/set).

use serde::Deserialize;

use crate::models::Domain;
use crate::paths::Paths;

/// Keys accepted by `config set`.
pub const KNOWN_KEYS: [&str; 2] = ["catalog", "defaultDomain"];

/// Settings read from the config file. Missing file or keys mean defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// `builtin`, a file path or an http(s) URL.
    #[serde(default)]
    pub catalog: Option<String>,
    #[serde(default)]
    pub default_domain: Option<Domain>,
}

impl Settings {
    pub fn load(paths: &Paths) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(paths.config_file()) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::ReadFailed(e)),
        };
        serde_json::from_str(&content).map_err(ConfigError::ParseFailed)
    }

    /// Catalog location: `AGENTDIR_CATALOG`, then the config file, then builtin.
    pub fn catalog_location(&self) -> String {
        std::env::var("AGENTDIR_CATALOG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.catalog.clone())
            .unwrap_or_else(|| "builtin".to_string())
    }

    pub fn default_domain(&self) -> Domain {
        self.default_domain.unwrap_or(Domain::Skills)
    }
}

/// Read the raw config object, or an empty one if the file is missing.
pub fn read_config(paths: &Paths) -> Result<serde_json::Map<String, serde_json::Value>, ConfigError> {
    let content = match std::fs::read_to_string(paths.config_file()) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(serde_json::Map::new()),
        Err(e) => return Err(ConfigError::ReadFailed(e)),
    };
    let value: serde_json::Value = serde_json::from_str(&content).map_err(ConfigError::ParseFailed)?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(ConfigError::InvalidConfig),
    }
}

/// Set a config value. Persists to config.json.
/// Uses raw JSON to preserve keys this version does not know about.
pub fn set_config_value(paths: &Paths, key: &str, value: &str) -> Result<(), ConfigError> {
    if !KNOWN_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }
    let stored = match key {
        "defaultDomain" => {
            let domain = value
                .parse::<Domain>()
                .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
            serde_json::Value::String(domain.key().to_string())
        }
        _ => serde_json::Value::String(value.to_string()),
    };

    let mut config = read_config(paths)?;
    config.insert(key.to_string(), stored);

    let path = paths.config_file();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(ConfigError::CreateDir)?;
    }
    let output = serde_json::to_string_pretty(&serde_json::Value::Object(config))
        .map_err(ConfigError::SerializeFailed)?;
    std::fs::write(path, output).map_err(|e| ConfigError::WriteFailed(e, path.to_path_buf()))?;

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown config key: {0} (known: catalog, defaultDomain)")]
    UnknownKey(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Config file is not a JSON object")]
    InvalidConfig,
    #[error("Failed to read config: {0}")]
    ReadFailed(std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseFailed(serde_json::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeFailed(serde_json::Error),
    #[error("Failed to create directory: {0}")]
    CreateDir(std::io::Error),
    #[error("Failed to write config: {0}")]
    WriteFailed(std::io::Error, std::path::PathBuf),
}
