//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use std::fs;
use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::orchestrator::BatchReport;

/// 初始化 tracing 日志，输出到标准错误
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug 或 info 级别
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件，写入带时间的表头
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &Path) -> std::io::Result<()> {
    let log_header = format!(
        "{}\nHTML 转 PDF 失败记录 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - HTML 批量转 PDF");
    info!("📁 输入目录: {}", config.input_dir.display());
    info!("📂 输出目录: {}", config.output_dir.display());
    if config.fail_fast {
        info!("⛔ 遇到失败立即停止");
    }
    info!("{}", "=".repeat(60));
}

/// 记录待转换文件数量
pub fn log_files_found(total: usize) {
    info!("✓ 找到 {} 个待转换的 HTML 文件", total);
}

/// 打印最终统计信息
///
/// # 参数
/// - `report`: 批量转换结果
/// - `log_file_path`: 失败记录文件路径
pub fn print_final_stats(report: &BatchReport, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", report.converted_count(), report.total());
    info!("❌ 失败: {}", report.failed_count());
    if report.skipped_count() > 0 {
        info!("⏭️ 未处理: {}", report.skipped_count());
    }
    info!("{}", "=".repeat(60));
    if report.failed_count() > 0 {
        info!("\n失败记录已保存至: {}", log_file_path);
    }
}
