// ==========================================
// 产品目录 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 文件级（IO / 格式）错误终止整个导入
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误（IO）=====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    // ===== 文件格式错误 =====
    #[error("unsupported file format: {0} (only .xlsx/.xls are supported)")]
    UnsupportedFormat(String),

    #[error("spreadsheet format error: missing header row")]
    MissingHeader,

    #[error("spreadsheet parse failed: {0}")]
    ExcelParseError(String),
}

impl ImportError {
    /// 文件无法打开或读取
    pub fn is_io(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::FileReadError(_))
    }

    /// 文件格式不支持或结构不完整
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat(_) | Self::MissingHeader | Self::ExcelParseError(_)
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(err.to_string()),
            _ => ImportError::FileReadError(err.to_string()),
        }
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        match err {
            calamine::XlsxError::Io(e) => e.into(),
            other => ImportError::ExcelParseError(other.to_string()),
        }
    }
}

// 实现 From<calamine::XlsError>
impl From<calamine::XlsError> for ImportError {
    fn from(err: calamine::XlsError) -> Self {
        match err {
            calamine::XlsError::Io(e) => e.into(),
            other => ImportError::ExcelParseError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_classification() {
        let not_found: ImportError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(not_found, ImportError::FileNotFound(_)));
        assert!(not_found.is_io());
        assert!(!not_found.is_format());

        let denied: ImportError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(denied, ImportError::FileReadError(_)));
    }

    #[test]
    fn test_format_error_classification() {
        assert!(ImportError::MissingHeader.is_format());
        assert!(ImportError::UnsupportedFormat("csv".to_string()).is_format());
        assert!(!ImportError::ExcelParseError("zip".to_string()).is_io());
    }
}
