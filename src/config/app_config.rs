// ==========================================
// 产品目录 - 应用配置
// ==========================================
// 职责: 存储后端选择、文件路径、日志过滤
// 来源优先级: 环境变量 > 配置文件(JSON) > 默认值
// ==========================================

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 应用数据子目录名
pub const APP_DIR_NAME: &str = "product-catalog";

/// 环境变量键
pub mod env_keys {
    pub const STORAGE: &str = "PRODUCT_CATALOG_STORAGE";
    pub const DB_PATH: &str = "PRODUCT_CATALOG_DB_PATH";
    pub const DATA_FILE: &str = "PRODUCT_CATALOG_DATA_FILE";
    pub const EXPORT_DIR: &str = "PRODUCT_CATALOG_EXPORT_DIR";
    pub const LOG: &str = "PRODUCT_CATALOG_LOG";
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file read failed ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("config file parse failed ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("invalid config value {key}={value}")]
    InvalidValue { key: String, value: String },
}

// ==========================================
// StorageConfig - 目录存储后端
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageConfig {
    /// SQLite 数据库文件
    Sqlite { db_path: PathBuf },
    /// 进程内目录，可选 JSON 快照文件
    Memory {
        #[serde(default)]
        data_file: Option<PathBuf>,
    },
}

impl StorageConfig {
    fn default_sqlite() -> Self {
        StorageConfig::Sqlite {
            db_path: default_data_root().join("product_catalog.db"),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::default_sqlite()
    }
}

// ==========================================
// AppConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub export_dir: PathBuf,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            export_dir: default_data_root().join("exports"),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载（缺省字段取默认值）
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 应用进程环境变量覆写
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// 按给定的键值来源覆写配置（空白值忽略）
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(kind) = get(env_keys::STORAGE) {
            match kind.to_ascii_lowercase().as_str() {
                "sqlite" => {
                    if !matches!(self.storage, StorageConfig::Sqlite { .. }) {
                        self.storage = StorageConfig::default_sqlite();
                    }
                }
                "memory" => {
                    if !matches!(self.storage, StorageConfig::Memory { .. }) {
                        self.storage = StorageConfig::Memory { data_file: None };
                    }
                }
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: env_keys::STORAGE.to_string(),
                        value: kind,
                    })
                }
            }
        }

        match &mut self.storage {
            StorageConfig::Sqlite { db_path } => {
                if let Some(path) = get(env_keys::DB_PATH) {
                    *db_path = PathBuf::from(path);
                }
            }
            StorageConfig::Memory { data_file } => {
                if let Some(path) = get(env_keys::DATA_FILE) {
                    *data_file = Some(PathBuf::from(path));
                }
            }
        }

        if let Some(dir) = get(env_keys::EXPORT_DIR) {
            self.export_dir = PathBuf::from(dir);
        }
        if let Some(filter) = get(env_keys::LOG) {
            self.log_filter = filter;
        }

        Ok(())
    }

    /// 导出文件路径: {export_dir}/{prefix}_{毫秒时间戳}.xlsx
    pub fn export_file_path(&self, prefix: &str) -> PathBuf {
        self.export_dir
            .join(format!("{}_{}.xlsx", prefix, Utc::now().timestamp_millis()))
    }
}

/// 应用数据根目录（取不到用户数据目录时回退到当前目录）
pub fn default_data_root() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(matches!(config.storage, StorageConfig::Sqlite { .. }));
        assert_eq!(config.log_filter, "info");
        assert!(config.export_dir.ends_with("exports"));
    }

    #[test]
    fn test_from_file_with_partial_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "storage": { "type": "memory", "data_file": "/tmp/products.json" } }"#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(
            config.storage,
            StorageConfig::Memory {
                data_file: Some(PathBuf::from("/tmp/products.json"))
            }
        );
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_from_file_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            AppConfig::from_file(dir.path().join("missing.json")),
            Err(ConfigError::FileReadError { .. })
        ));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup(&[
                (env_keys::STORAGE, "Memory"),
                (env_keys::DATA_FILE, "/data/p.json"),
                (env_keys::EXPORT_DIR, "/exports"),
                (env_keys::LOG, "debug"),
                (env_keys::DB_PATH, "/ignored.db"),
            ]))
            .unwrap();

        assert_eq!(
            config.storage,
            StorageConfig::Memory {
                data_file: Some(PathBuf::from("/data/p.json"))
            }
        );
        assert_eq!(config.export_dir, PathBuf::from("/exports"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_override_rejects_unknown_storage() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(lookup(&[(env_keys::STORAGE, "redis")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_export_file_path() {
        let config = AppConfig {
            export_dir: PathBuf::from("/exports"),
            ..AppConfig::default()
        };
        let path = config.export_file_path("products");
        let name = path.file_name().unwrap().to_str().unwrap();

        assert!(path.starts_with("/exports"));
        assert!(name.starts_with("products_"));
        assert!(name.ends_with(".xlsx"));
    }
}
