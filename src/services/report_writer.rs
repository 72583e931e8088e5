//! 失败记录服务 - 业务能力层
//!
//! 只负责把转换失败的文件写入记录文件，不关心流程

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::utils::logging::init_log_file;

/// 失败记录
///
/// 每个失败的文件追加一行：时间、文件名、错误信息
pub struct FailureLog {
    log_file_path: PathBuf,
}

impl FailureLog {
    /// 创建记录文件并写入表头（覆盖已有内容）
    pub fn create(path: impl Into<PathBuf>) -> AppResult<Self> {
        let log_file_path = path.into();
        init_log_file(&log_file_path).map_err(|e| AppError::write_failed(&log_file_path, e))?;
        Ok(Self { log_file_path })
    }

    pub fn path(&self) -> &Path {
        &self.log_file_path
    }

    /// 追加一条失败记录
    pub fn record(&self, file_name: &str, error: &str) -> AppResult<()> {
        debug!("记录失败: {} | {}", file_name, error);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file_path)
            .map_err(|e| AppError::write_failed(&self.log_file_path, e))?;

        let line = format!(
            "[{}] {} | {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            file_name,
            error
        );
        file.write_all(line.as_bytes())
            .map_err(|e| AppError::write_failed(&self.log_file_path, e))?;

        Ok(())
    }
}
