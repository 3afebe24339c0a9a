use serde::{Deserialize, Serialize};
use super::paths;
use crate::domain::repository::Result;
use crate::infrastructure::persistence::sqlite::Association;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub sqlite: SqliteConfig,
    pub association: AssociationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SqliteConfig {
    /// Leave empty to use platform default path
    pub path: String,
}

impl SqliteConfig {
    pub fn effective_path(&self) -> PathBuf {
        if self.path.is_empty() {
            paths::default_sqlite_path()
        } else {
            PathBuf::from(&self.path)
        }
    }
}

/// Join table linking groups and users
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociationConfig {
    pub through: String,
    pub foreign_key: String,
    pub other_key: String,
}

impl AssociationConfig {
    pub fn to_association(&self) -> Result<Association> {
        Association::new(&self.through, &self.foreign_key, &self.other_key)
    }
}

impl Default for AssociationConfig {
    fn default() -> Self {
        let association = Association::default();
        Self {
            through: association.through,
            foreign_key: association.foreign_key,
            other_key: association.other_key,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` wins when set
    pub level: String,
    /// Also write daily-rotated log files under the config directory
    pub production: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            production: false,
        }
    }
}
