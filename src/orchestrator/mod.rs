//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量转换处理器
//! - 管理应用生命周期（初始化、运行）
//! - 扫描输入目录，逐个调度文件
//! - 决定失败后继续还是停止
//! - 输出全局统计信息
//!
//! ### `file_processor` - 单个文件处理器
//! - 构造转换请求并调用转换器
//! - 把错误整理为单个文件的结果
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理目录)
//!     ↓
//! file_processor (处理单个 HTML 文件)
//!     ↓
//! services (能力层：converter / report_writer)
//!     ↓
//! infrastructure (基础设施：RenderSession)
//! ```

pub mod batch_processor;
pub mod file_processor;
pub mod report;

pub use batch_processor::{App, BatchOptions, BatchRunner};
pub use file_processor::process_file;
pub use report::{BatchReport, FileOutcome, FileResult};
