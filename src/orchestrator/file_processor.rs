//! 单个文件处理器 - 编排层
//!
//! 把一个 HTML 条目交给转换器，并把结果（包括错误）整理为 [`FileResult`]，
//! 不向上抛出单个文件的错误

use std::path::Path;

use tracing::{error, info};

use crate::models::{ConversionRequest, HtmlEntry, RenderOptions};
use crate::orchestrator::report::{FileOutcome, FileResult};
use crate::services::{Converter, PdfRenderer};

/// 处理单个 HTML 文件
///
/// # 参数
/// - `converter`: 单文件转换器
/// - `entry`: 待转换的 HTML 文件
/// - `output_dir`: 输出目录
/// - `options`: 渲染选项
/// - `index`: 文件序号（从 1 开始，仅用于日志）
/// - `total`: 文件总数
pub async fn process_file<R: PdfRenderer>(
    converter: &Converter<R>,
    entry: &HtmlEntry,
    output_dir: &Path,
    options: &RenderOptions,
    index: usize,
    total: usize,
) -> FileResult {
    let pdf_name = entry.pdf_name();
    info!("[{}/{}] 📄 正在转换: {}", index, total, entry.file_name);

    let request = ConversionRequest::new(&entry.path, output_dir)
        .with_filename(pdf_name.as_str())
        .with_options(options.clone());

    let outcome = match converter.convert(&request).await {
        Ok(output_path) => {
            info!("[{}/{}] ✓ 已转换: {} -> {}", index, total, entry.file_name, pdf_name);
            FileOutcome::Converted { output_path }
        }
        Err(e) => {
            error!("[{}/{}] ❌ 转换失败: {}: {}", index, total, entry.file_name, e);
            FileOutcome::Failed {
                category: e.category(),
                message: e.to_string(),
            }
        }
    };

    FileResult {
        source: entry.path.clone(),
        file_name: entry.file_name.clone(),
        outcome,
    }
}
