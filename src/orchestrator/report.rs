//! 批量转换结果

use std::path::PathBuf;

use crate::error::ErrorCategory;

/// 单个文件的处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// 转换成功
    Converted { output_path: PathBuf },
    /// 转换失败
    Failed {
        category: ErrorCategory,
        message: String,
    },
    /// 因提前停止而未处理
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileResult {
    pub source: PathBuf,
    pub file_name: String,
    pub outcome: FileOutcome,
}

/// 一次批量转换的全部结果，按处理顺序排列
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub results: Vec<FileResult>,
}

impl BatchReport {
    pub fn push(&mut self, result: FileResult) {
        self.results.push(result);
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn converted(&self) -> impl Iterator<Item = &FileResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, FileOutcome::Converted { .. }))
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, FileOutcome::Failed { .. }))
    }

    pub fn skipped(&self) -> impl Iterator<Item = &FileResult> {
        self.results
            .iter()
            .filter(|r| r.outcome == FileOutcome::Skipped)
    }

    pub fn converted_count(&self) -> usize {
        self.converted().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }

    /// 所有文件都转换成功（空批次也算成功）
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0 && self.skipped_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, outcome: FileOutcome) -> FileResult {
        FileResult {
            source: PathBuf::from(name),
            file_name: name.to_string(),
            outcome,
        }
    }

    #[test]
    fn counts_each_outcome() {
        let mut report = BatchReport::default();
        assert!(report.is_success());

        report.push(result(
            "a.html",
            FileOutcome::Converted {
                output_path: PathBuf::from("a.pdf"),
            },
        ));
        report.push(result(
            "b.html",
            FileOutcome::Failed {
                category: ErrorCategory::RenderEngine,
                message: "boom".into(),
            },
        ));
        report.push(result("c.html", FileOutcome::Skipped));

        assert_eq!(report.total(), 3);
        assert_eq!(report.converted_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.failed().next().unwrap().file_name, "b.html");
        assert!(!report.is_success());
    }
}
