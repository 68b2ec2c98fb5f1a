// ==========================================
// 产品目录 - 应用层
// ==========================================
// 职责: 按配置组装目录仓储与 API
// ==========================================

pub mod state;

// 重导出
pub use state::AppState;
