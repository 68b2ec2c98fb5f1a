// ==========================================
// 产品目录 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供目录访问接口,屏蔽存储细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod memory_product_repo;
pub mod product_repo;
pub mod sqlite_product_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use memory_product_repo::MemoryProductRepository;
pub use product_repo::ProductRepository;
pub use sqlite_product_repo::SqliteProductRepository;
