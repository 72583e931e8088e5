use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::browser::BrowserSettings;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// HTML 源文件目录
    pub input_dir: PathBuf,
    /// PDF 输出目录
    pub output_dir: PathBuf,
    /// 遇到第一个失败即停止整个批次
    pub fail_fast: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 失败记录文件
    pub output_log_file: String,
    /// 浏览器可执行文件路径，未设置时自动查找
    pub chrome_executable: Option<PathBuf>,
    /// 判定网络空闲所需的静默时长（毫秒）
    pub network_idle_ms: u64,
    /// 页面加载总超时（秒）
    pub load_timeout_secs: u64,
    /// 渲染选项 TOML 文件
    pub render_options_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("HTML_Templates"),
            output_dir: PathBuf::from("PDF_Output"),
            fail_fast: false,
            verbose_logging: false,
            output_log_file: "conversion_failures.txt".to_string(),
            chrome_executable: None,
            network_idle_ms: 500,
            load_timeout_secs: 30,
            render_options_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        let config = Self {
            input_dir: std::env::var("HTML_INPUT_DIR").map(PathBuf::from).unwrap_or(default.input_dir),
            output_dir: std::env::var("PDF_OUTPUT_DIR").map(PathBuf::from).unwrap_or(default.output_dir),
            fail_fast: std::env::var("FAIL_FAST").ok().and_then(|v| v.parse().ok()).unwrap_or(default.fail_fast),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().map(PathBuf::from).or(default.chrome_executable),
            network_idle_ms: std::env::var("NETWORK_IDLE_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.network_idle_ms),
            load_timeout_secs: std::env::var("LOAD_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.load_timeout_secs),
            render_options_file: std::env::var("RENDER_OPTIONS_FILE").ok().map(PathBuf::from).or(default.render_options_file),
        };

        match std::env::current_dir() {
            Ok(base) => config.resolved_against(&base),
            Err(_) => config,
        }
    }

    /// 将相对的输入/输出目录解析为基于 `base` 的绝对路径
    pub fn resolved_against(mut self, base: &Path) -> Self {
        if self.input_dir.is_relative() {
            self.input_dir = base.join(&self.input_dir);
        }
        if self.output_dir.is_relative() {
            self.output_dir = base.join(&self.output_dir);
        }
        self
    }

    pub fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            chrome_executable: self.chrome_executable.clone(),
            ..BrowserSettings::default()
        }
    }

    pub fn network_idle(&self) -> Duration {
        Duration::from_millis(self.network_idle_ms)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }
}
