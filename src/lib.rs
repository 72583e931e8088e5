//! # HTML2PDF Batch
//!
//! 使用无头浏览器把目录中的 HTML 文件批量转换为 PDF
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 启动无头 Chromium
//! - `infrastructure/` - `RenderSession` 持有浏览器进程和唯一的 Page，
//!   提供"加载 HTML / 等待网络空闲 / 导出 PDF"能力，用完即释放
//!
//! ### ② 业务能力层（Services）
//! - `Converter` - 单个文件的转换（检查、读取、渲染、原子写入）
//! - `ChromeRenderer` - `PdfRenderer` 的 Chromium 实现
//! - `FailureLog` - 写失败记录
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 扫描目录、顺序调度、失败策略、统计
//! - `orchestrator/file_processor` - 单个文件的调度和结果整理
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, ErrorCategory};
pub use models::{ConversionRequest, Margin, PaperFormat, RenderOptions};
pub use orchestrator::{App, BatchOptions, BatchReport, BatchRunner};
pub use services::{convert_html_file_to_pdf, ChromeRenderer, Converter, PdfRenderer};
