// ==========================================
// 产品目录 - 产品导入器
// ==========================================
// 流程: 解析 → 逐行校验 → put_if_absent 入库 → 结果统计
// 规则:
// - 文件级错误（IO/格式）立即终止，写入 fatal_error，total_records = 0
// - 行级错误只记录失败明细，继续处理后续行
// - 严格按文件顺序串行处理，保证行号与失败信息一一对应
// ==========================================

use crate::domain::import::{ImportOutcome, ImportOutcomeBuilder};
use crate::domain::product::RowProduct;
use crate::importer::error::ImportError;
use crate::importer::file_parser::{ExcelProductReader, ProductFileReader};
use crate::importer::product_validator::validate_product;
use crate::repository::ProductRepository;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// 单行处理结果
enum RowOutcome {
    Imported,
    Failed(String),
}

// ==========================================
// ProductImporter - 产品导入器
// ==========================================
pub struct ProductImporter {
    // 目录（唯一共享可变资源）
    repo: Arc<dyn ProductRepository>,

    // 文件解析器
    file_reader: Box<dyn ProductFileReader>,
}

impl ProductImporter {
    /// 使用 Excel 解析器创建导入器
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self::with_reader(repo, Box::new(ExcelProductReader))
    }

    pub fn with_reader(
        repo: Arc<dyn ProductRepository>,
        file_reader: Box<dyn ProductFileReader>,
    ) -> Self {
        Self { repo, file_reader }
    }

    /// 从表格文件导入产品
    ///
    /// 总是返回结果；文件级错误体现在 `fatal_error` 中
    #[instrument(skip(self, file_path), fields(batch_id))]
    pub fn import<P: AsRef<Path>>(&self, file_path: P) -> ImportOutcome {
        let start_time = Instant::now();
        let file_path = file_path.as_ref();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        info!(file_path = %file_path.display(), "开始导入产品数据");

        let mut outcome = ImportOutcomeBuilder::new();

        // === 步骤 1: 解析文件 ===
        let rows = match self.file_reader.read(file_path) {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "文件解析失败");
                outcome.fatal(fatal_message(&e));
                return outcome.build();
            }
        };
        outcome.total_records(rows.len());
        debug!(total_rows = rows.len(), "文件解析完成");

        // === 步骤 2: 逐行校验入库 ===
        for row in &rows {
            match self.import_row(row) {
                RowOutcome::Imported => {
                    outcome.record_success();
                }
                RowOutcome::Failed(message) => {
                    warn!(row_number = row.row_number, reason = %message, "行导入失败");
                    outcome.record_failure(message);
                }
            }
        }

        let outcome = outcome.build();
        info!(
            total = outcome.total_records(),
            success = outcome.success_count(),
            failed = outcome.failure_count(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "产品导入完成"
        );
        outcome
    }

    /// 处理单行，任何错误都转成失败明细
    fn import_row(&self, row: &RowProduct) -> RowOutcome {
        let violations = validate_product(Some(&row.product));
        if !violations.is_empty() {
            return RowOutcome::Failed(format!(
                "Row {} validation failed: {}",
                row.row_number,
                violations.join(", ")
            ));
        }

        match self.repo.put_if_absent(&row.product) {
            Ok(true) => RowOutcome::Imported,
            Ok(false) => RowOutcome::Failed(format!(
                "Row {} import failed: id already exists or data error",
                row.row_number
            )),
            Err(e) => RowOutcome::Failed(format!(
                "Row {} processing exception: {}",
                row.row_number, e
            )),
        }
    }
}

/// 文件级错误的对外描述
fn fatal_message(err: &ImportError) -> String {
    if err.is_io() {
        format!("Failed to read spreadsheet file: {}", err)
    } else {
        format!("Spreadsheet format error: {}", err)
    }
}
