use include_dir::{include_dir, Dir};
use serde::de::DeserializeOwned;
use std::path::Path;

use super::paths::config_dir;

// Embed the entire configs directory at compile time
static CONFIGS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/resources/configs");

/// Load a YAML configuration file from disk
pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)?;
    let config: T = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Parse YAML from string
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> anyhow::Result<T> {
    let config: T = serde_yaml::from_str(content)?;
    Ok(config)
}

/// Load embedded configuration by name from the configs directory
pub fn load_embedded_config<T: DeserializeOwned + Default>(name: &str) -> T {
    let file_name = format!("{}.yaml", name);

    let Some(file) = CONFIGS_DIR.get_file(&file_name) else {
        tracing::warn!("Embedded config {} not found, using defaults", name);
        return T::default();
    };

    let Some(content) = file.contents_utf8() else {
        tracing::error!("Embedded config {} is not valid UTF-8", name);
        return T::default();
    };

    match parse_yaml::<T>(content) {
        Ok(config) => {
            tracing::debug!("Loaded embedded config: {}", name);
            config
        }
        Err(e) => {
            tracing::error!("Failed to parse embedded config {}: {}", name, e);
            T::default()
        }
    }
}

/// Load `<name>.yaml` from the user config directory, falling back to the
/// embedded copy when the file is missing or invalid
pub fn load_config<T: DeserializeOwned + Default>(name: &str) -> T {
    let user_path = config_dir().join(format!("{}.yaml", name));

    if user_path.exists() {
        match load_yaml::<T>(&user_path) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", user_path);
                return config;
            }
            Err(e) => {
                tracing::warn!("Failed to parse {:?}: {}, using embedded defaults", user_path, e);
            }
        }
    } else {
        tracing::debug!("No user override for {} config", name);
    }

    load_embedded_config(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::AppConfig;

    #[test]
    fn test_embedded_app_config() {
        let config: AppConfig = load_embedded_config("app");

        assert!(config.storage.sqlite.path.is_empty());
        assert_eq!(config.storage.association.through, "user_group_relations");
        assert!(config.storage.association.to_association().is_ok());
        assert!(!config.logging.production);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig = parse_yaml("storage:\n  sqlite:\n    path: /tmp/groups.db\n").unwrap();

        assert_eq!(config.storage.sqlite.path, "/tmp/groups.db");
        assert_eq!(config.storage.association.foreign_key, "group_id");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_embedded_config_falls_back() {
        let config: AppConfig = load_embedded_config("does-not-exist");
        assert_eq!(config.storage.association.other_key, "user_id");
    }
}
