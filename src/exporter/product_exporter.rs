// ==========================================
// 产品目录 - 产品导出器
// ==========================================
// 流程: 目录查询（全部/条件）→ 写出表格
// 规则: 以文件为单位全成功或全失败，不存在部分成功
// ==========================================

use crate::domain::product::{Product, ProductFilter};
use crate::exporter::error::ExportResult;
use crate::exporter::file_writer::{ExcelProductWriter, ProductFileWriter};
use crate::repository::ProductRepository;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, instrument};

pub struct ProductExporter {
    repo: Arc<dyn ProductRepository>,
    file_writer: Box<dyn ProductFileWriter>,
}

impl ProductExporter {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self::with_writer(repo, Box::new(ExcelProductWriter))
    }

    pub fn with_writer(
        repo: Arc<dyn ProductRepository>,
        file_writer: Box<dyn ProductFileWriter>,
    ) -> Self {
        Self { repo, file_writer }
    }

    /// 导出全部产品，失败时记录日志并返回 false
    pub fn export_all<P: AsRef<Path>>(&self, file_path: P) -> bool {
        report(self.try_export_all(file_path.as_ref()))
    }

    /// 导出满足条件的产品，失败时记录日志并返回 false
    pub fn export_filtered<P: AsRef<Path>>(&self, file_path: P, filter: &ProductFilter) -> bool {
        report(self.try_export_filtered(file_path.as_ref(), filter))
    }

    /// 导出全部产品，返回写出的行数
    #[instrument(skip(self))]
    pub fn try_export_all(&self, file_path: &Path) -> ExportResult<usize> {
        let products = self.repo.list()?;
        self.write(products, file_path)
    }

    /// 导出满足条件的产品，返回写出的行数
    #[instrument(skip(self))]
    pub fn try_export_filtered(
        &self,
        file_path: &Path,
        filter: &ProductFilter,
    ) -> ExportResult<usize> {
        let products = self.repo.search(filter)?;
        self.write(products, file_path)
    }

    fn write(&self, products: Vec<Product>, file_path: &Path) -> ExportResult<usize> {
        self.file_writer.write(&products, file_path)?;
        info!(file_path = %file_path.display(), rows = products.len(), "产品导出完成");
        Ok(products.len())
    }
}

fn report(result: ExportResult<usize>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            error!(error = %e, "产品导出失败");
            false
        }
    }
}
