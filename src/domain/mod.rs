// ==========================================
// 产品目录 - 领域模型层
// ==========================================
// 职责: 定义领域实体与导入结果
// 红线: 不含数据访问逻辑
// ==========================================

pub mod import;
pub mod product;

// 重导出核心类型
pub use import::{ImportOutcome, ImportOutcomeBuilder};
pub use product::{Product, ProductFilter, RowProduct};
