// ==========================================
// 产品目录 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 约束: 目录仓储只创建一次，导入/导出/API 共享同一实例
// ==========================================

use std::sync::Arc;

use crate::api::ProductApi;
use crate::config::{AppConfig, StorageConfig};
use crate::repository::{
    MemoryProductRepository, ProductRepository, RepositoryError, RepositoryResult,
    SqliteProductRepository,
};

/// 应用状态
pub struct AppState {
    /// 生效配置
    pub config: AppConfig,

    /// 产品目录
    pub repo: Arc<dyn ProductRepository>,

    /// 产品API
    pub product_api: Arc<ProductApi>,
}

impl AppState {
    /// 按配置创建AppState实例
    ///
    /// # 说明
    /// 1. 按存储配置打开目录（SQLite 文件 / 内存 + 可选快照）
    /// 2. 创建 API 实例
    pub fn new(config: AppConfig) -> RepositoryResult<Self> {
        let repo = open_catalog(&config.storage)?;
        Ok(Self::with_repository(config, repo))
    }

    /// 使用已有目录创建AppState实例
    pub fn with_repository(config: AppConfig, repo: Arc<dyn ProductRepository>) -> Self {
        let product_api = Arc::new(ProductApi::new(repo.clone()));
        Self {
            config,
            repo,
            product_api,
        }
    }
}

fn open_catalog(storage: &StorageConfig) -> RepositoryResult<Arc<dyn ProductRepository>> {
    match storage {
        StorageConfig::Sqlite { db_path } => {
            tracing::info!("初始化AppState，数据库路径: {}", db_path.display());
            if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    RepositoryError::DatabaseConnectionError(format!(
                        "无法创建数据库目录 {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
            Ok(Arc::new(SqliteProductRepository::new(db_path)?))
        }
        StorageConfig::Memory { data_file: Some(path) } => {
            tracing::info!("初始化AppState，内存目录快照: {}", path.display());
            Ok(Arc::new(MemoryProductRepository::with_data_file(path.clone())?))
        }
        StorageConfig::Memory { data_file: None } => {
            tracing::info!("初始化AppState，纯内存目录");
            Ok(Arc::new(MemoryProductRepository::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::Product;
    use tempfile::TempDir;

    #[test]
    fn test_sqlite_state_shares_catalog() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            storage: StorageConfig::Sqlite {
                db_path: dir.path().join("nested").join("catalog.db"),
            },
            ..AppConfig::default()
        };

        let state = AppState::new(config).unwrap();
        state
            .product_api
            .add_product(Product::new("1", "Pen", "", 2.0, 5, "office"))
            .unwrap();

        assert!(state.repo.get("1").unwrap().is_some());
    }

    #[test]
    fn test_memory_state_without_snapshot() {
        let config = AppConfig {
            storage: StorageConfig::Memory { data_file: None },
            ..AppConfig::default()
        };
        let state = AppState::new(config).unwrap();
        assert!(state.product_api.list_products().unwrap().is_empty());
    }
}
