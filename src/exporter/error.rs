// ==========================================
// 产品目录 - 导出模块错误类型
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("file write failed: {0}")]
    FileWriteError(String),

    #[error("spreadsheet generation failed: {0}")]
    XlsxError(String),

    #[error("catalog query failed: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::FileWriteError(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        match err {
            rust_xlsxwriter::XlsxError::IoError(e) => e.into(),
            other => ExportError::XlsxError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
