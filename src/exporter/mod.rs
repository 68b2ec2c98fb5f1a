// ==========================================
// 产品目录 - 导出层
// ==========================================
// 职责: 目录 → Excel 文件
// ==========================================

pub mod error;
pub mod file_writer;
pub mod product_exporter;

pub use error::{ExportError, ExportResult};
pub use file_writer::{ExcelProductWriter, ProductFileWriter, EXPORT_HEADERS, EXPORT_SHEET_NAME};
pub use product_exporter::ProductExporter;
