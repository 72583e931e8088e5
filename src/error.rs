use std::path::{Path, PathBuf};

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器（渲染引擎）相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 错误分类，供批量报告和测试使用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 源文件不存在
    NotFound,
    /// 渲染引擎失败（启动、加载、导出）
    RenderEngine,
    /// 文件系统读写失败
    Io,
    /// 配置无效
    Config,
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 浏览器配置失败
    #[error("浏览器配置失败: {message}")]
    ConfigurationFailed { message: String },
    /// 启动浏览器失败
    #[error("启动无头浏览器失败: {source}")]
    LaunchFailed { source: BoxError },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed { source: BoxError },
    /// 加载页面内容失败
    #[error("加载页面内容失败 ({base_url}): {source}")]
    ContentLoadFailed { base_url: String, source: BoxError },
    /// 等待网络空闲超时
    #[error("等待网络空闲超时 ({timeout_ms} ms), 仍有 {in_flight} 个请求未完成")]
    NetworkIdleTimeout { timeout_ms: u64, in_flight: usize },
    /// 导出 PDF 失败
    #[error("导出 PDF 失败: {source}")]
    PdfExportFailed { source: BoxError },
    /// 执行 DevTools 命令失败
    #[error("执行 DevTools 命令失败: {source}")]
    CommandFailed { source: BoxError },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {}", .path.display())]
    NotFound { path: PathBuf },
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({}): {source}", .path.display())]
    CreateDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 读取目录失败
    #[error("读取目录失败 ({}): {source}", .path.display())]
    ListDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 无法识别的纸张格式
    #[error("无法识别的纸张格式: '{name}'")]
    UnknownPaperFormat { name: String },
    /// 长度值无法解析
    #[error("无法解析长度值: '{value}' (支持 px / in / cm / mm)")]
    InvalidLength { value: String },
    /// 渲染选项文件解析失败
    #[error("渲染选项文件解析失败 ({}): {source}", .path.display())]
    InvalidOptionsFile {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// 附加渲染选项无法合并
    #[error("附加渲染选项无效: {source}")]
    InvalidExtraOption { source: serde_json::Error },
    /// 输出文件名不是单个普通文件名
    #[error("输出文件名无效: '{name}' (不能为空、绝对路径或包含目录)")]
    InvalidOutputFilename { name: String },
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::CommandFailed {
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建源文件不存在错误
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        AppError::File(FileError::NotFound { path: path.into() })
    }

    /// 创建文件读取错误
    pub fn read_failed(path: &Path, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 创建目录创建错误
    pub fn create_dir_failed(path: &Path, source: std::io::Error) -> Self {
        AppError::File(FileError::CreateDirFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 创建目录读取错误
    pub fn list_dir_failed(path: &Path, source: std::io::Error) -> Self {
        AppError::File(FileError::ListDirFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn write_failed(path: &Path, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 创建 PDF 导出错误
    pub fn pdf_export_failed(source: impl Into<BoxError>) -> Self {
        AppError::Browser(BrowserError::PdfExportFailed {
            source: source.into(),
        })
    }

    /// 错误所属分类
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Browser(_) => ErrorCategory::RenderEngine,
            AppError::File(FileError::NotFound { .. }) => ErrorCategory::NotFound,
            AppError::File(_) => ErrorCategory::Io,
            AppError::Config(_) => ErrorCategory::Config,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
