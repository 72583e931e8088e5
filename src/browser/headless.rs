use std::path::{Path, PathBuf};

use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::{AppResult, BrowserError};

/// 无头浏览器启动参数
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// 浏览器可执行文件，`None` 时由 chromiumoxide 自动查找
    pub chrome_executable: Option<PathBuf>,
    /// 附加的命令行参数
    pub args: Vec<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            chrome_executable: None,
            args: vec![
                "--disable-gpu".to_string(),
                "--no-sandbox".to_string(),
                "--disable-dev-shm-usage".to_string(),
                // 允许 file:// 页面加载同目录下的图片和样式
                "--allow-file-access-from-files".to_string(),
            ],
        }
    }
}

/// 启动无头浏览器
///
/// 每次调用都会启动独立的浏览器进程，使用 `profile_dir` 作为用户数据目录。
/// 返回浏览器和后台事件处理任务，调用方负责关闭两者。
pub async fn launch_headless_browser(
    settings: &BrowserSettings,
    profile_dir: &Path,
) -> AppResult<(Browser, JoinHandle<()>)> {
    info!("🚀 启动无头浏览器...");
    debug!("浏览器参数: {:?}, 用户目录: {}", settings, profile_dir.display());

    let mut builder = BrowserConfig::builder()
        .new_headless_mode()
        .user_data_dir(profile_dir)
        .args(settings.args.iter().map(String::as_str));

    if let Some(executable) = &settings.chrome_executable {
        builder = builder.chrome_executable(executable);
    }

    let config = builder.build().map_err(|e| {
        error!("配置无头浏览器失败: {}", e);
        BrowserError::ConfigurationFailed { message: e }
    })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        BrowserError::LaunchFailed {
            source: Box::new(e),
        }
    })?;
    debug!("无头浏览器启动成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    Ok((browser, handler_task))
}
