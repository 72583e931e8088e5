//! 批量转换处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量转换和结果统计。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建失败记录、加载渲染选项、创建转换器
//! 2. **批量加载**：扫描输入目录中所有 `.html` 文件（不递归）
//! 3. **顺序处理**：逐个转换，上一个完成后才开始下一个
//! 4. **失败策略**：默认跳过失败的文件继续处理；`fail_fast` 时遇到失败立即停止
//! 5. **全局统计**：汇总为 [`BatchReport`]
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个文件的细节
//! - **向下委托**：委托 file_processor 处理单个文件

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{find_html_files, load_render_options, RenderOptions};
use crate::orchestrator::file_processor::process_file;
use crate::orchestrator::report::{BatchReport, FileOutcome, FileResult};
use crate::services::converter::ensure_dir;
use crate::services::{ChromeRenderer, Converter, FailureLog, PdfRenderer};
use crate::utils::logging::{log_files_found, log_startup, print_final_stats};

/// 批量转换选项
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// 每个文件使用的渲染选项
    pub render_options: RenderOptions,
    /// 遇到第一个失败即停止
    pub fail_fast: bool,
}

/// 批量转换器
pub struct BatchRunner<R = ChromeRenderer> {
    converter: Converter<R>,
    options: BatchOptions,
    failure_log: Option<FailureLog>,
}

impl<R: PdfRenderer> BatchRunner<R> {
    pub fn new(converter: Converter<R>, options: BatchOptions) -> Self {
        Self {
            converter,
            options,
            failure_log: None,
        }
    }

    /// 失败的文件同时写入记录文件
    pub fn with_failure_log(mut self, failure_log: FailureLog) -> Self {
        self.failure_log = Some(failure_log);
        self
    }

    pub fn converter(&self) -> &Converter<R> {
        &self.converter
    }

    /// 转换 `input_dir` 中的所有 `.html` 文件到 `output_dir`
    ///
    /// 输入目录无法读取或输出目录无法创建时返回错误；
    /// 单个文件的错误记录在报告中
    pub async fn run_batch(&self, input_dir: &Path, output_dir: &Path) -> AppResult<BatchReport> {
        let output_dir = ensure_dir(output_dir).await?;

        info!("\n📁 正在扫描待转换的 HTML 文件...");
        let entries = find_html_files(input_dir).await?;
        let mut report = BatchReport::default();

        if entries.is_empty() {
            warn!("⚠️ 没有找到待转换的 HTML 文件: {}", input_dir.display());
            return Ok(report);
        }

        let total = entries.len();
        log_files_found(total);

        for (idx, entry) in entries.iter().enumerate() {
            let result = process_file(
                &self.converter,
                entry,
                &output_dir,
                &self.options.render_options,
                idx + 1,
                total,
            )
            .await;

            let failed = matches!(result.outcome, FileOutcome::Failed { .. });
            if let FileOutcome::Failed { message, .. } = &result.outcome {
                self.record_failure(&result.file_name, message);
            }
            report.push(result);

            if failed && self.options.fail_fast {
                let remaining = &entries[idx + 1..];
                if !remaining.is_empty() {
                    warn!("⛔ 已停止批量转换, {} 个文件未处理", remaining.len());
                }
                for skipped in remaining {
                    report.push(FileResult {
                        source: skipped.path.clone(),
                        file_name: skipped.file_name.clone(),
                        outcome: FileOutcome::Skipped,
                    });
                }
                break;
            }
        }

        Ok(report)
    }

    fn record_failure(&self, file_name: &str, message: &str) {
        if let Some(log) = &self.failure_log {
            if let Err(e) = log.record(file_name, message) {
                warn!("写入失败记录失败: {}", e);
            }
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    runner: BatchRunner<ChromeRenderer>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化失败记录文件
        let failure_log = FailureLog::create(&config.output_log_file)?;

        log_startup(&config);

        let render_options = match &config.render_options_file {
            Some(path) => load_render_options(path).await?,
            None => RenderOptions::default(),
        };

        let runner = BatchRunner::new(
            Converter::new(ChromeRenderer::from_config(&config)),
            BatchOptions {
                render_options,
                fail_fast: config.fail_fast,
            },
        )
        .with_failure_log(failure_log);

        Ok(Self { config, runner })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<BatchReport> {
        let report = self
            .runner
            .run_batch(&self.config.input_dir, &self.config.output_dir)
            .await?;

        print_final_stats(&report, &self.config.output_log_file);

        Ok(report)
    }
}
