//! 渲染会话 - 基础设施层
//!
//! 持有一个独立浏览器进程和它唯一的 Page，只暴露"加载 HTML"和"导出 PDF"的能力

use std::path::Path;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::{PrintToPdfParams, SetDocumentContentParams};
use chromiumoxide::{Browser, Page};
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

use crate::browser::{launch_headless_browser, BrowserSettings};
use crate::error::{AppError, AppResult, BrowserError};
use crate::infrastructure::network_idle::NetworkIdleWatcher;

/// 渲染会话
///
/// 职责：
/// - 每次转换独占一个浏览器进程和用户目录，互不影响
/// - 持有唯一的 Page 资源
/// - 不认识批量任务和输出文件
///
/// 使用完毕必须调用 [`RenderSession::close`]。若会话在关闭前被丢弃，
/// 后台任务会被中止，浏览器进程由 chromiumoxide 的 `Drop` 结束。
pub struct RenderSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    _profile_dir: TempDir,
}

impl RenderSession {
    /// 启动浏览器并创建空白页面
    pub async fn open(settings: &BrowserSettings) -> AppResult<Self> {
        let profile_dir = tempfile::Builder::new()
            .prefix("html2pdf-profile-")
            .tempdir()
            .map_err(|e| BrowserError::LaunchFailed {
                source: Box::new(e),
            })?;

        let (mut browser, handler_task) =
            launch_headless_browser(settings, profile_dir.path()).await?;

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                shutdown_browser(&mut browser, &handler_task).await;
                return Err(BrowserError::PageCreationFailed {
                    source: Box::new(e),
                }
                .into());
            }
        };
        debug!("渲染会话已创建");

        Ok(Self {
            browser,
            page,
            handler_task,
            _profile_dir: profile_dir,
        })
    }

    /// 获取 page 的引用
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 以 `base_dir` 为文档地址加载 HTML，并等待网络空闲
    ///
    /// 页面先导航到 `base_dir` 对应的 `file://` 地址，再替换文档内容，
    /// 这样 HTML 中的相对路径都会相对于该目录解析
    pub async fn load_html(
        &self,
        html: &str,
        base_dir: &Path,
        network_idle: Duration,
        load_timeout: Duration,
    ) -> AppResult<()> {
        let base_url = directory_url(base_dir)?;
        debug!("加载 HTML ({} 字节), 基础地址: {}", html.len(), base_url);

        let load_failed = |e: chromiumoxide::error::CdpError| -> AppError {
            BrowserError::ContentLoadFailed {
                base_url: base_url.to_string(),
                source: Box::new(e),
            }
            .into()
        };

        self.page.goto(base_url.as_str()).await.map_err(load_failed)?;

        let frame_id = self
            .page
            .mainframe()
            .await
            .map_err(load_failed)?
            .ok_or_else(|| BrowserError::ContentLoadFailed {
                base_url: base_url.to_string(),
                source: "页面没有主框架".into(),
            })?;

        let watcher = NetworkIdleWatcher::attach(&self.page).await?;
        self.page
            .execute(SetDocumentContentParams::new(frame_id, html))
            .await
            .map_err(load_failed)?;

        watcher.wait_for_idle(network_idle, load_timeout).await
    }

    /// 将当前页面导出为 PDF
    pub async fn print_pdf(&self, params: PrintToPdfParams) -> AppResult<Vec<u8>> {
        let bytes = self.page.pdf(params).await.map_err(AppError::pdf_export_failed)?;
        if bytes.is_empty() {
            return Err(AppError::pdf_export_failed("渲染引擎返回了空文档"));
        }
        Ok(bytes)
    }

    /// 关闭浏览器、等待进程退出并停止事件处理任务
    pub async fn close(mut self) {
        shutdown_browser(&mut self.browser, &self.handler_task).await;
        debug!("渲染会话已释放");
    }
}

impl Drop for RenderSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

async fn shutdown_browser(browser: &mut Browser, handler_task: &JoinHandle<()>) {
    if let Err(e) = browser.close().await {
        warn!("关闭浏览器失败: {}", e);
    }
    if let Err(e) = browser.wait().await {
        warn!("等待浏览器进程退出失败: {}", e);
    }
    handler_task.abort();
}

/// 目录对应的 `file://` 地址，以 `/` 结尾
pub fn directory_url(dir: &Path) -> AppResult<Url> {
    Url::from_directory_path(dir).map_err(|_| {
        BrowserError::ContentLoadFailed {
            base_url: dir.display().to_string(),
            source: "无法将目录转换为 file:// 地址（需要绝对路径）".into(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_url_ends_with_slash() {
        let dir = std::env::temp_dir();
        let url = directory_url(&dir).unwrap();
        assert_eq!(url.scheme(), "file");
        assert!(url.as_str().ends_with('/'));
    }

    #[test]
    fn relative_directory_is_rejected() {
        assert!(directory_url(Path::new("relative/dir")).is_err());
    }
}
