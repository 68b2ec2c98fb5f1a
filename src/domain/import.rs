// ==========================================
// 产品目录 - 导入结果
// ==========================================
// 职责: 导入过程的结果统计与报告渲染
// 生命周期: 管道开始时创建 Builder，逐行累加，结束时冻结为 ImportOutcome
// ==========================================

use serde::Serialize;
use std::fmt;

// ==========================================
// ImportOutcome - 导入结果（不可变）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    total_records: usize,
    success_count: usize,
    failures: Vec<String>,
    fatal_error: Option<String>,
}

impl ImportOutcome {
    /// 解析出的行数
    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    /// 失败数 = 总数 - 成功数
    pub fn failure_count(&self) -> usize {
        self.total_records.saturating_sub(self.success_count)
    }

    /// 逐行失败明细（文件顺序）
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// 整个文件无法解析时的错误信息
    pub fn fatal_error(&self) -> Option<&str> {
        self.fatal_error.as_deref()
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal_error.is_some()
    }
}

impl fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Import report:")?;
        writeln!(f, "Total records: {}", self.total_records)?;
        writeln!(f, "Succeeded: {}", self.success_count)?;
        writeln!(f, "Failed: {}", self.failure_count())?;

        if let Some(error) = self.fatal_error.as_deref().filter(|e| !e.is_empty()) {
            writeln!(f, "Error: {}", error)?;
        }

        if !self.failures.is_empty() {
            writeln!(f, "Detailed failures:")?;
            for failure in &self.failures {
                writeln!(f, "{}", failure)?;
            }
        }

        Ok(())
    }
}

// ==========================================
// ImportOutcomeBuilder - 导入结果累加器
// ==========================================
// 规则: 计数只增不减，失败只追加
#[derive(Debug, Default)]
pub struct ImportOutcomeBuilder {
    total_records: usize,
    success_count: usize,
    failures: Vec<String>,
    fatal_error: Option<String>,
}

impl ImportOutcomeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_records(&mut self, total: usize) -> &mut Self {
        self.total_records = total;
        self
    }

    pub fn record_success(&mut self) -> &mut Self {
        self.success_count += 1;
        self
    }

    pub fn record_failure(&mut self, failure: impl Into<String>) -> &mut Self {
        self.failures.push(failure.into());
        self
    }

    pub fn fatal(&mut self, message: impl Into<String>) -> &mut Self {
        self.fatal_error = Some(message.into());
        self
    }

    /// 冻结为不可变结果
    pub fn build(self) -> ImportOutcome {
        ImportOutcome {
            total_records: self.total_records,
            success_count: self.success_count,
            failures: self.failures,
            fatal_error: self.fatal_error,
        }
    }
}
