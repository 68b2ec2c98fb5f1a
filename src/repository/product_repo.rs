// ==========================================
// 产品目录 - 产品仓储 Trait
// ==========================================
// 职责: 定义目录数据访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::product::{Product, ProductFilter};
use crate::repository::error::RepositoryResult;

// ==========================================
// ProductRepository Trait
// ==========================================
// 用途: 产品目录（导入/导出管道与 API 共享的唯一可变资源）
// 实现者: SqliteProductRepository, MemoryProductRepository
pub trait ProductRepository: Send + Sync {
    /// 按主键查询
    fn get(&self, id: &str) -> RepositoryResult<Option<Product>>;

    /// 主键不存在时插入（存在性检查与插入必须原子）
    ///
    /// # 返回
    /// - Ok(true): 已插入
    /// - Ok(false): 主键已存在，或主键缺失/空白
    /// - Err: 存储错误
    fn put_if_absent(&self, product: &Product) -> RepositoryResult<bool>;

    /// 覆盖已存在的产品
    ///
    /// # 返回
    /// - Ok(true): 存在且已覆盖
    /// - Ok(false): 不存在
    fn update(&self, product: &Product) -> RepositoryResult<bool>;

    /// 删除产品，返回是否存在
    fn delete(&self, id: &str) -> RepositoryResult<bool>;

    /// 全部产品（按主键排序）
    fn list(&self) -> RepositoryResult<Vec<Product>>;

    /// 条件查询（按主键排序）
    fn search(&self, filter: &ProductFilter) -> RepositoryResult<Vec<Product>>;
}
