//! 测试用渲染器

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{AppResult, BrowserError};
use crate::models::RenderOptions;
use crate::services::converter::PdfRenderer;

/// 一次渲染调用的记录
#[derive(Debug, Clone)]
pub struct RenderCall {
    pub html: String,
    pub base_dir: PathBuf,
    pub options: RenderOptions,
}

/// 不启动浏览器的渲染器：输出以 `%PDF-` 开头的伪文档，
/// HTML 中包含 [`FakeRenderer::FAIL_MARKER`] 时返回渲染失败
#[derive(Debug, Default)]
pub struct FakeRenderer {
    calls: Mutex<Vec<RenderCall>>,
}

impl FakeRenderer {
    pub const FAIL_MARKER: &'static str = "<!-- engine-rejects -->";

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl PdfRenderer for FakeRenderer {
    async fn render(
        &self,
        html: &str,
        base_dir: &Path,
        options: &RenderOptions,
    ) -> AppResult<Vec<u8>> {
        self.calls.lock().unwrap().push(RenderCall {
            html: html.to_string(),
            base_dir: base_dir.to_path_buf(),
            options: options.clone(),
        });

        if html.contains(Self::FAIL_MARKER) {
            return Err(BrowserError::ContentLoadFailed {
                base_url: base_dir.display().to_string(),
                source: "fake engine rejected markup".into(),
            }
            .into());
        }

        Ok(format!("%PDF-1.7\n% {html}\n%%EOF\n").into_bytes())
    }
}
