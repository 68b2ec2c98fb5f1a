// ==========================================
// 产品目录 - 核心库
// ==========================================
// 功能: 产品目录维护 + Excel 批量导入导出
// 技术栈: Rust + SQLite + calamine/rust_xlsxwriter
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 表格文件 → 目录
pub mod importer;

// 导出层 - 目录 → 表格文件
pub mod exporter;

// 配置层 - 应用配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{ImportOutcome, Product, ProductFilter, RowProduct};

// 仓储
pub use repository::{MemoryProductRepository, ProductRepository, SqliteProductRepository};

// 导入导出
pub use exporter::ProductExporter;
pub use importer::ProductImporter;

// API
pub use api::{ApiError, ApiResult, ProductApi};

// 配置与应用
pub use app::AppState;
pub use config::AppConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产品目录管理";
