use std::path::Path;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;

use crate::browser::BrowserSettings;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::RenderSession;
use crate::models::RenderOptions;
use crate::services::converter::PdfRenderer;

/// 基于无头 Chromium 的渲染器
///
/// 每次渲染启动一个新的浏览器，结束后无论成功与否都会关闭
#[derive(Debug, Clone)]
pub struct ChromeRenderer {
    settings: BrowserSettings,
    network_idle: Duration,
    load_timeout: Duration,
}

impl ChromeRenderer {
    pub fn new(settings: BrowserSettings, network_idle: Duration, load_timeout: Duration) -> Self {
        Self {
            settings,
            network_idle,
            load_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.browser_settings(),
            config.network_idle(),
            config.load_timeout(),
        )
    }

    async fn render_in(
        &self,
        session: &RenderSession,
        html: &str,
        base_dir: &Path,
        params: PrintToPdfParams,
    ) -> AppResult<Vec<u8>> {
        session
            .load_html(html, base_dir, self.network_idle, self.load_timeout)
            .await?;
        session.print_pdf(params).await
    }
}

impl Default for ChromeRenderer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl PdfRenderer for ChromeRenderer {
    async fn render(
        &self,
        html: &str,
        base_dir: &Path,
        options: &RenderOptions,
    ) -> AppResult<Vec<u8>> {
        // 选项无效时不启动浏览器
        let params = options.to_print_params()?;

        let session = RenderSession::open(&self.settings).await?;
        let result = self.render_in(&session, html, base_dir, params).await;
        session.close().await;
        result
    }
}
