// ==========================================
// 产品目录 - 导入层
// ==========================================
// 职责: 表格文件 → 候选产品 → 校验 → 目录
// 支持: Excel (.xlsx/.xls)
// ==========================================

// 模块声明
pub mod cell_value;
pub mod error;
pub mod file_parser;
pub mod product_importer;
pub mod product_validator;

// 重导出核心类型
pub use cell_value::CellValue;
pub use error::{ImportError, ImportResult};
pub use file_parser::{ExcelProductReader, ProductFileReader};
pub use product_importer::ProductImporter;
pub use product_validator::{is_valid_id, validate_product};
