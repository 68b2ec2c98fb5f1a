// ==========================================
// 产品目录 - 配置层
// ==========================================
// 职责: 应用配置加载，支持文件与环境变量覆写
// ==========================================

pub mod app_config;

pub use app_config::{default_data_root, env_keys, AppConfig, ConfigError, StorageConfig};
